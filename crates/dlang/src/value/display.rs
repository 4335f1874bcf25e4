//! Display and Debug implementations for Value

use std::fmt;

use super::Value;

/// Render a number the way `print` shows it.
///
/// Integral values have no fraction (`14`, not `14.0`); everything else uses
/// the shortest round-trip form (`3.5`).
pub(crate) fn format_number(n: f64) -> String {
    if n == 0.0 {
        // Also folds -0 into 0
        "0".to_string()
    } else {
        format!("{}", n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::String(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Unit => f.write_str("()"),
            Value::Function(func) => write!(f, "<function {}>", func.name),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::String(s) => write!(f, "{:?}", &**s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Unit => f.write_str("()"),
            Value::Function(func) => write!(f, "<function {}/{}>", func.name, func.arity()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_numbers_have_no_fraction() {
        assert_eq!(Value::Number(14.0).to_string(), "14");
        assert_eq!(Value::Number(-3.0).to_string(), "-3");
        assert_eq!(Value::Number(-0.0).to_string(), "0");
        assert_eq!(Value::Number(1e16).to_string(), "10000000000000000");
    }

    #[test]
    fn test_fractional_numbers() {
        assert_eq!(Value::Number(3.5).to_string(), "3.5");
        assert_eq!(Value::Number(0.1 + 0.2).to_string(), "0.30000000000000004");
    }

    #[test]
    fn test_strings_print_unquoted() {
        assert_eq!(Value::from("Hello").to_string(), "Hello");
        assert_eq!(format!("{:?}", Value::from("Hello")), "\"Hello\"");
    }

    #[test]
    fn test_bool_and_unit() {
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Unit.to_string(), "()");
    }
}
