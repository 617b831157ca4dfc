use core::fmt;

use serde::{Deserialize, Serialize};

/// A literal value pushed by the bytecode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Result of an empty program or body, or of a conditional with no
    /// matching clause.
    Undefined,
    Number(f64),
    Boolean(bool),
    /// Characters between the quotes, taken verbatim.
    String(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Number(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Value::Undefined.to_string(), "undefined");
        assert_eq!(Value::Number(1.0).to_string(), "1");
        assert_eq!(Value::Number(-11.22).to_string(), "-11.22");
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::String("hi there".to_string()).to_string(), "\"hi there\"");
    }
}
