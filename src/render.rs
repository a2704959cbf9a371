use crate::ast::{BinaryOp, CmpOp, Expr, Literal, UnaryOp};
use std::fmt;

/// Render an expression in the conventional guard-chain form:
/// `when(x > 0).then(1).otherwise(when(x < 0).then(-1).otherwise(0))`.
///
/// This is the stable text surface used by diagnostics and golden-fixture
/// tests. The actual target-library code generator is an external
/// collaborator; it consumes the tree, not this string.
pub fn render(expr: &Expr) -> String {
    let mut w = Writer { buf: String::new() };
    w.write_expr(expr);
    w.buf
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

struct Writer {
    buf: String,
}

impl Writer {
    fn write_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(lit) => self.write_literal(lit),

            Expr::Name(name) => self.buf.push_str(name),

            Expr::Unary { op, operand } => {
                self.buf.push_str(unary_token(*op));
                self.write_operand(operand);
            }

            Expr::Binary { op, left, right } => {
                self.write_operand(left);
                self.buf.push(' ');
                self.buf.push_str(binary_token(*op));
                self.buf.push(' ');
                self.write_operand(right);
            }

            Expr::Compare {
                left,
                ops,
                comparators,
            } => {
                // Chained comparisons never survive substitution, but the
                // renderer stays total over the grammar.
                self.write_operand(left);
                for (op, comparator) in ops.iter().zip(comparators) {
                    self.buf.push(' ');
                    self.buf.push_str(cmp_token(*op));
                    self.buf.push(' ');
                    self.write_operand(comparator);
                }
            }

            Expr::Call { func, args, kwargs } => {
                self.buf.push_str(func);
                self.buf.push('(');
                let mut first = true;
                for arg in args {
                    if !first {
                        self.buf.push_str(", ");
                    }
                    first = false;
                    self.write_expr(arg);
                }
                for (key, value) in kwargs {
                    if !first {
                        self.buf.push_str(", ");
                    }
                    first = false;
                    self.buf.push_str(key);
                    self.buf.push('=');
                    self.write_expr(value);
                }
                self.buf.push(')');
            }

            Expr::Ternary { test, body, orelse } => {
                self.buf.push('(');
                self.write_expr(body);
                self.buf.push_str(" if ");
                self.write_expr(test);
                self.buf.push_str(" else ");
                self.write_expr(orelse);
                self.buf.push(')');
            }

            Expr::Tuple(elements) => {
                self.buf.push('(');
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        self.buf.push_str(", ");
                    }
                    self.write_expr(element);
                }
                if elements.len() == 1 {
                    self.buf.push(',');
                }
                self.buf.push(')');
            }

            Expr::Guarded { cases, default } => {
                for (test, value) in cases {
                    self.buf.push_str("when(");
                    self.write_expr(test);
                    self.buf.push_str(").then(");
                    self.write_expr(value);
                    self.buf.push_str(").");
                }
                self.buf.push_str("otherwise(");
                self.write_expr(default);
                self.buf.push(')');
            }

            Expr::Unsupported(kind) => {
                self.buf.push('<');
                self.buf.push_str(kind);
                self.buf.push('>');
            }
        }
    }

    /// Like `write_expr`, but wraps non-atomic operators in parentheses so
    /// nesting stays unambiguous without precedence bookkeeping.
    fn write_operand(&mut self, expr: &Expr) {
        let composite = matches!(
            expr,
            Expr::Unary { .. } | Expr::Binary { .. } | Expr::Compare { .. }
        );
        if composite {
            self.buf.push('(');
            self.write_expr(expr);
            self.buf.push(')');
        } else {
            self.write_expr(expr);
        }
    }

    fn write_literal(&mut self, lit: &Literal) {
        match lit {
            Literal::Int(v) => self.buf.push_str(&v.to_string()),
            Literal::Float(v) => self.buf.push_str(&v.to_string()),
            Literal::Bool(v) => self.buf.push_str(if *v { "true" } else { "false" }),
            Literal::Str(v) => {
                self.buf.push('"');
                for ch in v.chars() {
                    if ch == '"' || ch == '\\' {
                        self.buf.push('\\');
                    }
                    self.buf.push(ch);
                }
                self.buf.push('"');
            }
        }
    }
}

fn unary_token(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Neg => "-",
        UnaryOp::Not => "~",
    }
}

fn binary_token(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::Mod => "%",
        BinaryOp::And => "&",
        BinaryOp::Or => "|",
    }
}

fn cmp_token(op: CmpOp) -> &'static str {
    match op {
        CmpOp::Eq => "==",
        CmpOp::Ne => "!=",
        CmpOp::Lt => "<",
        CmpOp::Le => "<=",
        CmpOp::Gt => ">",
        CmpOp::Ge => ">=",
    }
}
