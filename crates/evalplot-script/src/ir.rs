//! Typed statement IR for generated R programs.
//!
//! Builders assemble [`Statement`] and [`Expr`] values; the `render` module is
//! the only place that knows R's concrete syntax.

/// Binary operators used by generated programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Sub,
    Div,
    Range,
    Eq,
    Ne,
    And,
    In,
}

/// An R expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(String),
    Str(String),
    Num(f64),
    Bool(bool),
    Null,
    /// Caller supplied R source, emitted verbatim (axis label functions, breaks).
    Raw(String),
    Call {
        func: String,
        args: Vec<Arg>,
    },
    Field {
        target: Box<Expr>,
        name: String,
    },
    /// `target[i, j]`; `None` leaves a slot empty, as in `df[rows, ]`.
    Index {
        target: Box<Expr>,
        indices: Vec<Option<Expr>>,
    },
    /// `target[[i]]`
    Element {
        target: Box<Expr>,
        index: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Neg(Box<Expr>),
    Not(Box<Expr>),
    Formula {
        lhs: Option<Box<Expr>>,
        rhs: Box<Expr>,
    },
    Paren(Box<Expr>),
    /// ggplot layer chain joined with `+`.
    Layers(Vec<Expr>),
}

/// A positional or named call argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    pub name: Option<String>,
    pub value: Expr,
}

impl Arg {
    pub fn pos(value: Expr) -> Self {
        Self { name: None, value }
    }

    pub fn named(name: impl Into<String>, value: Expr) -> Self {
        Self {
            name: Some(name.into()),
            value,
        }
    }
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Str(value.into())
    }

    pub fn num(value: impl Into<f64>) -> Self {
        Expr::Num(value.into())
    }

    pub fn raw(source: impl Into<String>) -> Self {
        Expr::Raw(source.into())
    }

    pub fn call(func: impl Into<String>, args: Vec<Arg>) -> Self {
        Expr::Call {
            func: func.into(),
            args,
        }
    }

    /// Call with positional arguments only.
    pub fn apply(func: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::call(func, args.into_iter().map(Arg::pos).collect())
    }

    /// `c(...)` vector of strings.
    pub fn strings<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::apply("c", values.into_iter().map(Expr::string).collect())
    }

    pub fn field(self, name: impl Into<String>) -> Self {
        Expr::Field {
            target: Box::new(self),
            name: name.into(),
        }
    }

    pub fn index(self, indices: Vec<Option<Expr>>) -> Self {
        Expr::Index {
            target: Box::new(self),
            indices,
        }
    }

    /// `self[index]`
    pub fn at(self, index: Expr) -> Self {
        self.index(vec![Some(index)])
    }

    pub fn element(self, index: Expr) -> Self {
        Expr::Element {
            target: Box::new(self),
            index: Box::new(index),
        }
    }

    pub fn binary(self, op: BinaryOp, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(self),
            rhs: Box::new(rhs),
        }
    }

    pub fn eq(self, rhs: Expr) -> Self {
        self.binary(BinaryOp::Eq, rhs)
    }

    pub fn neg(self) -> Self {
        Expr::Neg(Box::new(self))
    }

    pub fn not(self) -> Self {
        Expr::Not(Box::new(self))
    }

    pub fn paren(self) -> Self {
        Expr::Paren(Box::new(self))
    }

    pub fn formula(lhs: Option<Expr>, rhs: Expr) -> Self {
        Expr::Formula {
            lhs: lhs.map(Box::new),
            rhs: Box::new(rhs),
        }
    }

    /// Appends a layer, flattening nested chains.
    pub fn plus(self, layer: Expr) -> Self {
        let mut layers = match self {
            Expr::Layers(layers) => layers,
            other => vec![other],
        };
        layers.push(layer);
        Expr::Layers(layers)
    }
}

/// Parameter of a generated R function.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub default: Option<Expr>,
}

impl Param {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    pub fn with_default(name: impl Into<String>, default: Expr) -> Self {
        Self {
            name: name.into(),
            default: Some(default),
        }
    }
}

/// One statement of the generated program.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Comment(String),
    Blank,
    Assign {
        target: Expr,
        value: Expr,
    },
    Eval(Expr),
    If {
        cond: Expr,
        then: Vec<Statement>,
        otherwise: Vec<Statement>,
    },
    For {
        var: String,
        over: Expr,
        body: Vec<Statement>,
    },
    Function {
        name: String,
        params: Vec<Param>,
        body: Vec<Statement>,
    },
    Return(Expr),
    Next,
}

impl Statement {
    pub fn comment(text: impl Into<String>) -> Self {
        Statement::Comment(text.into())
    }

    pub fn assign(target: impl Into<String>, value: Expr) -> Self {
        Statement::Assign {
            target: Expr::ident(target),
            value,
        }
    }

    pub fn assign_to(target: Expr, value: Expr) -> Self {
        Statement::Assign { target, value }
    }

    pub fn eval(expr: Expr) -> Self {
        Statement::Eval(expr)
    }

    pub fn when(cond: Expr, then: Vec<Statement>) -> Self {
        Statement::If {
            cond,
            then,
            otherwise: Vec::new(),
        }
    }

    pub fn for_each(var: impl Into<String>, over: Expr, body: Vec<Statement>) -> Self {
        Statement::For {
            var: var.into(),
            over,
            body,
        }
    }
}
