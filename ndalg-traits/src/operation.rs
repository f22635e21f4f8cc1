//! Closed enumerations of operator tokens used by named dispatch.
//!
//! Expression evaluators hold operator names as strings. Each name is parsed
//! once into a token; algebras then map tokens to their own methods through
//! the tables in [`crate::algebra`].

use std::fmt;

/// Binary operator tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `"+"`: addition
    Plus,
    /// `"-"`: subtraction
    Minus,
    /// `"*"`: multiplication
    Times,
    /// `"/"`: division
    Div,
}

impl BinaryOp {
    /// All binary tokens, in table order.
    pub const ALL: [BinaryOp; 4] = [
        BinaryOp::Plus,
        BinaryOp::Minus,
        BinaryOp::Times,
        BinaryOp::Div,
    ];

    /// Parse an operator name. Returns `None` for unknown names.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(BinaryOp::Plus),
            "-" => Some(BinaryOp::Minus),
            "*" => Some(BinaryOp::Times),
            "/" => Some(BinaryOp::Div),
            _ => None,
        }
    }

    /// The operator name this token was parsed from.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Plus => "+",
            BinaryOp::Minus => "-",
            BinaryOp::Times => "*",
            BinaryOp::Div => "/",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary operator tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `"+"`: identity
    Plus,
    /// `"-"`: additive inverse
    Minus,
    /// `"sqrt"`: square root
    Sqrt,
    /// `"exp"`: exponential
    Exp,
    /// `"ln"`: natural logarithm
    Ln,
}

impl UnaryOp {
    /// Parse an operator name. Returns `None` for unknown names.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(UnaryOp::Plus),
            "-" => Some(UnaryOp::Minus),
            "sqrt" => Some(UnaryOp::Sqrt),
            "exp" => Some(UnaryOp::Exp),
            "ln" => Some(UnaryOp::Ln),
            _ => None,
        }
    }

    /// The operator name this token was parsed from.
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::Sqrt => "sqrt",
            UnaryOp::Exp => "exp",
            UnaryOp::Ln => "ln",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_symbol_roundtrip() {
        for op in BinaryOp::ALL {
            assert_eq!(BinaryOp::from_symbol(op.symbol()), Some(op));
        }
    }

    #[test]
    fn test_unknown_symbols() {
        assert_eq!(BinaryOp::from_symbol("^"), None);
        assert_eq!(BinaryOp::from_symbol(""), None);
        assert_eq!(UnaryOp::from_symbol("sin"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(BinaryOp::Div.to_string(), "/");
        assert_eq!(UnaryOp::Ln.to_string(), "ln");
    }
}
