//! Renders a function definition as a formula.

pub mod functions;

use crate::{
    constant::{escape, format_constant},
    identifier::IdentifierConverter,
};
use functions::{Notation, FUNCTIONS};
use log::debug;
use mathify_error::Error;
use mathify_parser::parser::{
    ast::{
        Attribute,
        BinOp,
        BoolOp,
        Call,
        Compare,
        Constant,
        Expr,
        FunctionDef,
        If,
        IfExp,
        Literal,
        Name,
        Return,
        Stmt,
        Target,
        UnaryOp,
    },
    token::op::{BinOpKind, CmpOpKind, UnaryOpKind},
    Precedence,
};
use mathify_transform::{error::{UnsupportedStatement, UnsupportedTarget}, expansion::expand_call};
use std::{collections::HashSet, ops::Range};

/// A rendered expression, along with how tightly it binds.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Rendered {
    text: String,

    /// The precedence of the rendered text. This can differ from the precedence of the expression
    /// it was rendered from: `a / b` renders as `frac(a, b)`, which binds like an atom.
    precedence: Precedence,

    /// True if the text is a single symbol or number that can be applied to without parentheses.
    atomic: bool,

    /// True if the text is an operator word applied without parentheses, such as `sin x`.
    bare_call: bool,
}

impl Rendered {
    fn new(text: String, precedence: Precedence) -> Self {
        Self { text, precedence, atomic: false, bare_call: false }
    }

    fn atom(text: String) -> Self {
        Self::new(text, Precedence::Atom)
    }

    /// Returns true if the text starts with a sign, such as `-x` or `-2`.
    fn signed(&self) -> bool {
        self.text.starts_with(['+', '-'])
    }

    /// Returns the text, wrapped in parentheses if `wrap` is true.
    fn wrapped_if(self, wrap: bool) -> String {
        if wrap {
            format!("( {} )", self.text)
        } else {
            self.text
        }
    }
}

fn unsupported(span: Range<usize>, kind: impl Into<String>) -> Error {
    Error::new(vec![span], UnsupportedStatement { kind: kind.into() })
}

fn bin_op_symbol(op: BinOpKind) -> &'static str {
    match op {
        BinOpKind::Add => "+",
        BinOpKind::Sub => "-",
        BinOpKind::Mult => "dot",
        BinOpKind::Mod => "mod",
        BinOpKind::LShift => "<<",
        BinOpKind::RShift => ">>",
        BinOpKind::BitOr => "|",
        BinOpKind::BitXor => "xor",
        BinOpKind::BitAnd => "\\&",
        BinOpKind::MatMult | BinOpKind::Div | BinOpKind::FloorDiv | BinOpKind::Pow => "",
    }
}

fn unary_op_symbol(op: UnaryOpKind) -> &'static str {
    match op {
        UnaryOpKind::UAdd => "+",
        UnaryOpKind::USub => "-",
        UnaryOpKind::Not => "not ",
        UnaryOpKind::Invert => "tilde.op ",
    }
}

fn cmp_op_symbol(op: CmpOpKind) -> &'static str {
    match op {
        CmpOpKind::Eq => "=",
        CmpOpKind::NotEq => "!=",
        CmpOpKind::Lt => "<",
        CmpOpKind::LtE => "<=",
        CmpOpKind::Gt => ">",
        CmpOpKind::GtE => ">=",
        CmpOpKind::Is => "equiv",
        CmpOpKind::IsNot => "equiv.not",
        CmpOpKind::In => "in",
        CmpOpKind::NotIn => "in.not",
    }
}

/// Renders a function definition, or a single expression, as a formula.
///
/// The definition is expected to be reduced already: any number of assignments to single names,
/// followed by a `return` or `if` statement. Calls to the functions in the expansion set are
/// replaced with their defining formulas as they are rendered.
///
/// ```
/// use mathify_codegen::{FormulaGenerator, IdentifierConverter};
/// use mathify_parser::parser::{ast::FunctionDef, Parser};
/// use std::collections::HashSet;
///
/// let func = Parser::new("def f(x, y):\n    return x ** 2 / y\n")
///     .try_parse_full::<FunctionDef>()
///     .unwrap();
/// let expand = HashSet::new();
/// let generator = FormulaGenerator::new(IdentifierConverter::default(), &expand);
/// assert_eq!(generator.generate_function(&func).unwrap(), "op(\"f\")( x, y ) = frac(x^(2), y)");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FormulaGenerator<'a> {
    identifiers: IdentifierConverter<'a>,
    expand_functions: &'a HashSet<String>,
    sig_figs: Option<usize>,
    use_signature: bool,
}

impl<'a> FormulaGenerator<'a> {
    /// Creates a generator that renders names with the given converter and expands calls to the
    /// given functions.
    pub fn new(identifiers: IdentifierConverter<'a>, expand_functions: &'a HashSet<String>) -> Self {
        Self { identifiers, expand_functions, sig_figs: None, use_signature: true }
    }

    /// Formats floats and complex numbers to the given number of significant figures.
    pub fn with_sig_figs(self, sig_figs: Option<usize>) -> Self {
        Self { sig_figs, ..self }
    }

    /// Controls whether `op("f")( params ) =` is written before the body.
    pub fn with_signature(self, use_signature: bool) -> Self {
        Self { use_signature, ..self }
    }

    /// Renders the function definition.
    pub fn generate_function(&self, func: &FunctionDef) -> Result<String, Error> {
        debug!("rendering `{}`", func.name);
        let Some((terminal, assignments)) = func.body.split_last() else {
            return Err(unsupported(func.span(), "empty function body"));
        };

        let mut lines = assignments
            .iter()
            .map(|stmt| self.assignment(stmt))
            .collect::<Result<Vec<_>, _>>()?;

        let body = match terminal {
            Stmt::Return(ret) => self.return_value(ret)?,
            Stmt::If(stmt) => self.if_stmt(stmt)?,
            other => return Err(unsupported(other.span(), other.kind_name())),
        };

        if self.use_signature {
            let params = func
                .params
                .iter()
                .map(|param| self.name(&param.name).map(|rendered| rendered.text))
                .collect::<Result<Vec<_>, _>>()?;
            let name = escape(&func.name.id);
            if params.is_empty() {
                lines.push(format!("op(\"{}\")() = {}", name, body));
            } else {
                lines.push(format!("op(\"{}\")( {} ) = {}", name, params.join(", "), body));
            }
        } else {
            lines.push(body);
        }

        Ok(lines.join(" \\ "))
    }

    /// Renders the expression.
    pub fn generate_expr(&self, expr: &Expr) -> Result<String, Error> {
        self.render(expr).map(|rendered| rendered.text)
    }

    /// Renders an assignment that precedes the final statement.
    fn assignment(&self, stmt: &Stmt) -> Result<String, Error> {
        let Stmt::Assign(assign) = stmt else {
            return Err(unsupported(stmt.span(), stmt.kind_name()));
        };
        let target = match assign.targets.as_slice() {
            [Target::Name(name)] => name,
            [target] => return Err(Error::new(vec![target.span()], UnsupportedTarget)),
            _ => return Err(unsupported(assign.span(), "Assign with multiple targets")),
        };
        Ok(format!("{} = {}", self.name(target)?.text, self.generate_expr(&assign.value)?))
    }

    fn return_value(&self, ret: &Return) -> Result<String, Error> {
        match &ret.value {
            Some(value) => self.generate_expr(value),
            None => self.generate_expr(&Expr::Constant(Constant::with_span(Literal::None, ret.span.clone()))),
        }
    }

    /// Renders the value of a branch of an `if` statement.
    fn branch(&self, body: &[Stmt], span: Range<usize>) -> Result<String, Error> {
        match body {
            [Stmt::Return(ret)] => self.return_value(ret),
            [Stmt::If(stmt)] => self.if_stmt(stmt),
            [other] => Err(unsupported(other.span(), other.kind_name())),
            [] => Err(unsupported(span, "If without else")),
            _ => Err(unsupported(span, "If with multiple statements")),
        }
    }

    /// Renders an `if` statement as cases, with one row for each `elif` branch.
    fn if_stmt(&self, stmt: &If) -> Result<String, Error> {
        let mut rows = Vec::new();
        let mut current = stmt;
        loop {
            rows.push(format!(
                "{} & \"if\" {}",
                self.branch(&current.body, current.span.clone())?,
                self.generate_expr(&current.test)?,
            ));
            match current.orelse.as_slice() {
                [Stmt::If(elif)] => current = elif,
                orelse => {
                    rows.push(format!("{} & \"otherwise\"", self.branch(orelse, current.span.clone())?));
                    break;
                },
            }
        }
        Ok(format!("cases({})", rows.join(", ")))
    }

    fn render(&self, expr: &Expr) -> Result<Rendered, Error> {
        match expr {
            Expr::Name(name) => self.name(name),
            Expr::Constant(constant) => self.constant(constant),
            Expr::Call(call) => match expand_call(call, self.expand_functions) {
                Some(expanded) => self.render(&expanded),
                None => self.call(call),
            },
            Expr::Attribute(attribute) => Ok(self.attribute(attribute)),
            Expr::BinOp(bin_op) => self.bin_op(bin_op),
            Expr::UnaryOp(UnaryOp { op, operand, .. }) => {
                let operand = self.render(operand)?;
                let wrap = operand.precedence < op.precedence()
                    || (matches!(op, UnaryOpKind::UAdd | UnaryOpKind::USub) && operand.signed());
                Ok(Rendered::new(
                    format!("{}{}", unary_op_symbol(*op), operand.wrapped_if(wrap)),
                    op.precedence(),
                ))
            },
            Expr::Compare(Compare { left, comparators, .. }) => {
                let mut text = self.compare_operand(left)?;
                for (op, operand) in comparators {
                    text.push_str(&format!(" {} {}", cmp_op_symbol(*op), self.compare_operand(operand)?));
                }
                Ok(Rendered::new(text, Precedence::Compare))
            },
            Expr::BoolOp(BoolOp { op, values, .. }) => {
                let values = values
                    .iter()
                    .map(|value| {
                        let value = self.render(value)?;
                        let wrap = value.precedence < op.precedence();
                        Ok(value.wrapped_if(wrap))
                    })
                    .collect::<Result<Vec<_>, Error>>()?;
                let separator = format!(" {} ", op.symbol());
                Ok(Rendered::new(values.join(separator.as_str()), op.precedence()))
            },
            Expr::IfExp(if_exp) => self.if_exp(if_exp),
        }
    }

    fn name(&self, name: &Name) -> Result<Rendered, Error> {
        let identifier = self
            .identifiers
            .convert(&name.id)
            .map_err(|kind| Error::new(vec![name.span()], kind))?;
        Ok(Rendered {
            text: identifier.token,
            precedence: if identifier.atomic { Precedence::Atom } else { Precedence::Unary },
            atomic: identifier.atomic,
            bare_call: false,
        })
    }

    fn constant(&self, constant: &Constant) -> Result<Rendered, Error> {
        let text = format_constant(&constant.value, self.sig_figs)
            .map_err(|kind| Error::new(vec![constant.span()], kind))?;

        let signed_parts = text.chars().skip(1).any(|c| c == '+' || c == '-');
        let precedence = if constant.value.is_negative() {
            Precedence::Unary
        } else if text.contains(" times ") {
            Precedence::Factor
        } else if matches!(constant.value, Literal::Complex { .. }) && !text.starts_with('(') && signed_parts {
            Precedence::Term
        } else {
            Precedence::Atom
        };
        let atomic = precedence == Precedence::Atom
            && matches!(constant.value, Literal::Int(_) | Literal::Float(_));
        Ok(Rendered { text, precedence, atomic, bare_call: false })
    }

    fn attribute(&self, attribute: &Attribute) -> Rendered {
        let known = match (attribute.base_name(), attribute.attr.id.as_str()) {
            (Some("math" | "numpy" | "np"), "pi") => Some("pi"),
            (Some("math" | "numpy" | "np"), "e") => Some("e"),
            (Some("math" | "numpy" | "np"), "inf") => Some("infinity"),
            (Some("math" | "numpy" | "np"), "tau") => Some("tau"),
            _ => None,
        };
        match known {
            Some(symbol) => Rendered {
                text: symbol.to_string(),
                precedence: Precedence::Atom,
                atomic: true,
                bare_call: false,
            },
            None => Rendered::new(format!("\"{}\"", escape(&attribute.to_string())), Precedence::Unary),
        }
    }

    fn bin_op(&self, bin_op: &BinOp) -> Result<Rendered, Error> {
        let BinOp { left, op, right, .. } = bin_op;
        match op {
            BinOpKind::Div => Ok(Rendered::atom(format!(
                "frac({}, {})",
                self.generate_expr(left)?,
                self.generate_expr(right)?,
            ))),
            BinOpKind::FloorDiv => Ok(Rendered::atom(format!(
                "floor(frac({}, {}))",
                self.generate_expr(left)?,
                self.generate_expr(right)?,
            ))),
            BinOpKind::Pow => {
                let base = self.render(left)?;
                let wrap = base.precedence <= Precedence::Exp;
                Ok(Rendered::new(
                    format!("{}^({})", base.wrapped_if(wrap), self.generate_expr(right)?),
                    Precedence::Exp,
                ))
            },
            _ => {
                let precedence = op.precedence();
                let left = self.render(left)?;
                let right = self.render(right)?;
                let mut wrap_left = left.precedence < precedence;
                let mut wrap_right = right.precedence < precedence
                    || (right.precedence == precedence && !op.is_commutative());

                // juxtaposed operands must not merge: `a -b` and `sin x y`
                if *op == BinOpKind::MatMult {
                    wrap_left |= left.bare_call;
                    wrap_right |= right.signed();
                }

                let left = left.wrapped_if(wrap_left);
                let right = right.wrapped_if(wrap_right);
                let text = match op {
                    BinOpKind::MatMult => format!("{} {}", left, right),
                    _ => format!("{} {} {}", left, bin_op_symbol(*op), right),
                };
                Ok(Rendered::new(text, precedence))
            },
        }
    }

    fn compare_operand(&self, expr: &Expr) -> Result<String, Error> {
        let operand = self.render(expr)?;
        let wrap = operand.precedence <= Precedence::Compare;
        Ok(operand.wrapped_if(wrap))
    }

    /// Renders a conditional expression as cases, flattening conditionals in the `else` branch.
    fn if_exp(&self, if_exp: &IfExp) -> Result<Rendered, Error> {
        let mut rows = Vec::new();
        let mut current = if_exp;
        loop {
            rows.push(format!(
                "{} & \"if\" {}",
                self.generate_expr(&current.body)?,
                self.generate_expr(&current.test)?,
            ));
            match &*current.orelse {
                Expr::IfExp(next) => current = next,
                orelse => {
                    rows.push(format!("{} & \"otherwise\"", self.generate_expr(orelse)?));
                    break;
                },
            }
        }
        Ok(Rendered::atom(format!("cases({})", rows.join(", "))))
    }

    fn args(&self, args: &[Expr]) -> Result<String, Error> {
        Ok(args
            .iter()
            .map(|arg| self.generate_expr(arg))
            .collect::<Result<Vec<_>, _>>()?
            .join(", "))
    }

    /// Renders a call that is not expanded.
    fn call(&self, call: &Call) -> Result<Rendered, Error> {
        let notation = call.func_name().and_then(|name| FUNCTIONS.get(name)).copied();
        match (notation, call.args.as_slice()) {
            (Some(Notation::Word(word)), [arg]) => {
                let arg = self.render(arg)?;
                if arg.atomic {
                    Ok(Rendered {
                        bare_call: true,
                        ..Rendered::new(format!("{} {}", word, arg.text), Precedence::Unary)
                    })
                } else {
                    Ok(Rendered::atom(format!("{} ( {} )", word, arg.text)))
                }
            },
            (Some(Notation::Word(word) | Notation::Applied(word)), args) if !args.is_empty() => {
                Ok(Rendered::atom(format!("{} ( {} )", word, self.args(args)?)))
            },
            (Some(Notation::Enclosing(name)), [arg]) => {
                Ok(Rendered::atom(format!("{}( {} )", name, self.generate_expr(arg)?)))
            },
            (Some(Notation::Factorial), [arg]) => {
                let arg = self.render(arg)?;
                let wrap = arg.precedence < Precedence::Atom;
                Ok(Rendered::atom(format!("{}!", arg.wrapped_if(wrap))))
            },
            (_, args) => {
                let name = call.dotted_name().unwrap_or_else(|| call.func.to_string());
                let name = escape(&name);
                if args.is_empty() {
                    Ok(Rendered::atom(format!("op(\"{}\")()", name)))
                } else {
                    Ok(Rendered::atom(format!("op(\"{}\")( {} )", name, self.args(args)?)))
                }
            },
        }
    }
}
