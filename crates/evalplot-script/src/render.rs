//! Serializes the statement IR to R source text.

use crate::ir::{Arg, BinaryOp, Expr, Param, Statement};

const INDENT: &str = "  ";

/// Renders a whole program, one statement per line, newline terminated.
pub fn program(statements: &[Statement]) -> String {
    let mut out = String::new();
    block(&mut out, statements, 0);
    out
}

/// Renders a single expression.
pub fn expr(e: &Expr) -> String {
    let mut out = String::new();
    write_expr(&mut out, e);
    out
}

/// Quotes a string literal using R escape rules.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// Formats a numeric literal; integral values carry no fractional part.
pub fn number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let inf = if value > 0.0 { "Inf" } else { "-Inf" };
        inf.to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn block(out: &mut String, statements: &[Statement], depth: usize) {
    for statement in statements {
        write_statement(out, statement, depth);
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn write_statement(out: &mut String, statement: &Statement, depth: usize) {
    match statement {
        Statement::Blank => out.push('\n'),
        Statement::Comment(text) => {
            indent(out, depth);
            out.push_str("# ");
            out.push_str(text);
            out.push('\n');
        }
        Statement::Assign { target, value } => {
            indent(out, depth);
            write_expr(out, target);
            out.push_str(" <- ");
            write_expr(out, value);
            out.push('\n');
        }
        Statement::Eval(e) => {
            indent(out, depth);
            write_expr(out, e);
            out.push('\n');
        }
        Statement::If { .. } => {
            indent(out, depth);
            write_if(out, statement, depth);
            out.push('\n');
        }
        Statement::For { var, over, body } => {
            indent(out, depth);
            out.push_str("for (");
            out.push_str(var);
            out.push_str(" in ");
            write_expr(out, over);
            out.push_str(") {\n");
            block(out, body, depth + 1);
            indent(out, depth);
            out.push_str("}\n");
        }
        Statement::Function { name, params, body } => {
            indent(out, depth);
            out.push_str(name);
            out.push_str(" <- function(");
            write_params(out, params);
            out.push_str(") {\n");
            block(out, body, depth + 1);
            indent(out, depth);
            out.push_str("}\n");
        }
        Statement::Return(e) => {
            indent(out, depth);
            out.push_str("return(");
            write_expr(out, e);
            out.push_str(")\n");
        }
        Statement::Next => {
            indent(out, depth);
            out.push_str("next\n");
        }
    }
}

// Writes an if chain without leading indent or trailing newline; a sole nested
// `If` in the else branch becomes `else if`.
fn write_if(out: &mut String, statement: &Statement, depth: usize) {
    let Statement::If {
        cond,
        then,
        otherwise,
    } = statement
    else {
        return;
    };
    out.push_str("if (");
    write_expr(out, cond);
    out.push_str(") {\n");
    block(out, then, depth + 1);
    indent(out, depth);
    out.push('}');
    match otherwise.as_slice() {
        [] => {}
        [nested @ Statement::If { .. }] => {
            out.push_str(" else ");
            write_if(out, nested, depth);
        }
        rest => {
            out.push_str(" else {\n");
            block(out, rest, depth + 1);
            indent(out, depth);
            out.push('}');
        }
    }
}

fn write_params(out: &mut String, params: &[Param]) {
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&param.name);
        if let Some(default) = &param.default {
            out.push('=');
            write_expr(out, default);
        }
    }
}

fn write_args(out: &mut String, args: &[Arg]) {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if let Some(name) = &arg.name {
            out.push_str(name);
            out.push('=');
        }
        write_expr(out, &arg.value);
    }
}

fn operator(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Sub => "-",
        BinaryOp::Div => "/",
        BinaryOp::Range => ":",
        BinaryOp::Eq => " == ",
        BinaryOp::Ne => " != ",
        BinaryOp::And => " && ",
        BinaryOp::In => " %in% ",
    }
}

fn write_expr(out: &mut String, e: &Expr) {
    match e {
        Expr::Ident(name) => out.push_str(name),
        Expr::Str(value) => out.push_str(&quote(value)),
        Expr::Num(value) => out.push_str(&number(*value)),
        Expr::Bool(true) => out.push_str("TRUE"),
        Expr::Bool(false) => out.push_str("FALSE"),
        Expr::Null => out.push_str("NULL"),
        Expr::Raw(source) => out.push_str(source),
        Expr::Call { func, args } => {
            out.push_str(func);
            out.push('(');
            write_args(out, args);
            out.push(')');
        }
        Expr::Field { target, name } => {
            write_expr(out, target);
            out.push('$');
            out.push_str(name);
        }
        Expr::Index { target, indices } => {
            write_expr(out, target);
            out.push('[');
            for (i, slot) in indices.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                if let Some(index) = slot {
                    write_expr(out, index);
                }
            }
            out.push(']');
        }
        Expr::Element { target, index } => {
            write_expr(out, target);
            out.push_str("[[");
            write_expr(out, index);
            out.push_str("]]");
        }
        Expr::Binary { op, lhs, rhs } => {
            write_expr(out, lhs);
            out.push_str(operator(*op));
            write_expr(out, rhs);
        }
        Expr::Neg(inner) => {
            out.push('-');
            write_expr(out, inner);
        }
        Expr::Not(inner) => {
            out.push('!');
            write_expr(out, inner);
        }
        Expr::Formula { lhs, rhs } => {
            if let Some(lhs) = lhs {
                write_expr(out, lhs);
                out.push(' ');
            }
            out.push_str("~ ");
            write_expr(out, rhs);
        }
        Expr::Paren(inner) => {
            out.push('(');
            write_expr(out, inner);
            out.push(')');
        }
        Expr::Layers(layers) => {
            for (i, layer) in layers.iter().enumerate() {
                if i > 0 {
                    out.push_str(" + ");
                }
                write_expr(out, layer);
            }
        }
    }
}
