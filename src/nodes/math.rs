//! Scalar arithmetic and conversion nodes.

use crate::core::descriptor::NodeDescriptor;
use crate::core::error::{NodeError, TrellisError};
use crate::core::types::{TypeTag, Value};
use crate::registry::NodeRegistry;

/// Register the `math` node family.
pub fn register(registry: &mut NodeRegistry) -> Result<(), TrellisError> {
    // Constants and conversions.
    NodeDescriptor::builder("integer", "Integer")
        .category("math")
        .int_param("value", 0)
        .output(TypeTag::Integer)
        .body(|args| Ok(vec![Value::Integer(args.integer("value")?)]))
        .register(registry)?;

    NodeDescriptor::builder("integer_to_float", "Integer to Float")
        .category("math")
        .int_param("value", 0)
        .output(TypeTag::Float)
        .body(|args| Ok(vec![Value::Float(args.integer("value")? as f64)]))
        .register(registry)?;

    NodeDescriptor::builder("float", "Float")
        .category("math")
        .float_param("value", 0.0)
        .output(TypeTag::Float)
        .body(|args| Ok(vec![Value::Float(args.float("value")?)]))
        .register(registry)?;

    NodeDescriptor::builder("float_to_integer", "Float to Integer")
        .category("math")
        .float_param("value", 0.0)
        .output(TypeTag::Integer)
        .body(|args| Ok(vec![Value::Integer(args.float("value")?.round() as i64)]))
        .register(registry)?;

    // Integer arithmetic. Division promotes to FLOAT so no precision is
    // lost; dividing by zero is a runtime failure, not a NaN.
    NodeDescriptor::builder("integer_add", "Integer Add")
        .category("math")
        .int_param("a", 0)
        .int_param("b", 0)
        .output(TypeTag::Integer)
        .body(|args| Ok(vec![Value::Integer(args.integer("a")? + args.integer("b")?)]))
        .register(registry)?;

    NodeDescriptor::builder("integer_subtract", "Integer Subtract")
        .category("math")
        .int_param("a", 0)
        .int_param("b", 0)
        .output(TypeTag::Integer)
        .body(|args| Ok(vec![Value::Integer(args.integer("a")? - args.integer("b")?)]))
        .register(registry)?;

    NodeDescriptor::builder("integer_multiply", "Integer Multiply")
        .category("math")
        .int_param("a", 0)
        .int_param("b", 0)
        .output(TypeTag::Integer)
        .body(|args| Ok(vec![Value::Integer(args.integer("a")? * args.integer("b")?)]))
        .register(registry)?;

    NodeDescriptor::builder("integer_divide", "Integer Divide")
        .category("math")
        .int_param("a", 0)
        .int_param("b", 0)
        .output(TypeTag::Float)
        .body(|args| {
            let a = args.integer("a")?;
            let b = args.integer("b")?;
            Ok(vec![Value::Float(divide(a as f64, b as f64)?)])
        })
        .register(registry)?;

    // Float arithmetic.
    NodeDescriptor::builder("float_add", "Float Add")
        .category("math")
        .float_param("a", 0.0)
        .float_param("b", 0.0)
        .output(TypeTag::Float)
        .body(|args| Ok(vec![Value::Float(args.float("a")? + args.float("b")?)]))
        .register(registry)?;

    NodeDescriptor::builder("float_subtract", "Float Subtract")
        .category("math")
        .float_param("a", 0.0)
        .float_param("b", 0.0)
        .output(TypeTag::Float)
        .body(|args| Ok(vec![Value::Float(args.float("a")? - args.float("b")?)]))
        .register(registry)?;

    NodeDescriptor::builder("float_multiply", "Float Multiply")
        .category("math")
        .float_param("a", 0.0)
        .float_param("b", 0.0)
        .output(TypeTag::Float)
        .body(|args| Ok(vec![Value::Float(args.float("a")? * args.float("b")?)]))
        .register(registry)?;

    NodeDescriptor::builder("float_divide", "Float Divide")
        .category("math")
        .float_param("a", 0.0)
        .float_param("b", 0.0)
        .output(TypeTag::Float)
        .body(|args| Ok(vec![Value::Float(divide(args.float("a")?, args.float("b")?)?)])
        )
        .register(registry)?;

    Ok(())
}

fn divide(a: f64, b: f64) -> Result<f64, NodeError> {
    if b == 0.0 {
        return Err(NodeError::Execution("division by zero".to_string()));
    }
    Ok(a / b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::args::Args;

    fn registry() -> NodeRegistry {
        let mut registry = NodeRegistry::new();
        register(&mut registry).unwrap();
        registry
    }

    fn run(registry: &NodeRegistry, id: &str, args: Args) -> Vec<Value> {
        registry.get(id).unwrap().execute(args).unwrap()
    }

    #[test]
    fn test_constants_echo_their_input() {
        let r = registry();
        assert_eq!(
            run(&r, "integer", Args::new().with("value", 42i64)),
            vec![Value::Integer(42)]
        );
        assert_eq!(
            run(&r, "float", Args::new().with("value", 2.5)),
            vec![Value::Float(2.5)]
        );
    }

    #[test]
    fn test_conversions() {
        let r = registry();
        assert_eq!(
            run(&r, "integer_to_float", Args::new().with("value", 5i64)),
            vec![Value::Float(5.0)]
        );
        // Rounds to nearest, not truncation.
        assert_eq!(
            run(&r, "float_to_integer", Args::new().with("value", 2.6)),
            vec![Value::Integer(3)]
        );
        assert_eq!(
            run(&r, "float_to_integer", Args::new().with("value", -2.6)),
            vec![Value::Integer(-3)]
        );
    }

    #[test]
    fn test_integer_arithmetic() {
        let r = registry();
        let args = |a: i64, b: i64| Args::new().with("a", a).with("b", b);
        assert_eq!(run(&r, "integer_add", args(3, 4)), vec![Value::Integer(7)]);
        assert_eq!(run(&r, "integer_subtract", args(3, 4)), vec![Value::Integer(-1)]);
        assert_eq!(run(&r, "integer_multiply", args(3, 4)), vec![Value::Integer(12)]);
    }

    #[test]
    fn test_integer_division_promotes_to_float() {
        let r = registry();
        let out = run(&r, "integer_divide", Args::new().with("a", 7i64).with("b", 2i64));
        assert_eq!(out, vec![Value::Float(3.5)]);

        let node = r.get("integer_divide").unwrap();
        assert_eq!(node.outputs, vec![TypeTag::Float]);
    }

    #[test]
    fn test_float_arithmetic() {
        let r = registry();
        let args = |a: f64, b: f64| Args::new().with("a", a).with("b", b);
        assert_eq!(run(&r, "float_add", args(1.5, 2.0)), vec![Value::Float(3.5)]);
        assert_eq!(run(&r, "float_subtract", args(1.5, 2.0)), vec![Value::Float(-0.5)]);
        assert_eq!(run(&r, "float_multiply", args(1.5, 2.0)), vec![Value::Float(3.0)]);
        assert_eq!(run(&r, "float_divide", args(1.0, 4.0)), vec![Value::Float(0.25)]);
    }

    #[test]
    fn test_division_by_zero_is_a_runtime_error() {
        let r = registry();
        for id in ["integer_divide", "float_divide"] {
            let node = r.get(id).unwrap();
            let err = node
                .execute(Args::new().with("a", 1i64).with("b", 0i64))
                .unwrap_err();
            assert!(
                matches!(&err, NodeError::Execution(msg) if msg == "division by zero"),
                "{}: {:?}",
                id,
                err
            );
        }
    }
}
