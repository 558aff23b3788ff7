//! Human readable dump of the IR, for debugging the analyzer and optimizer

use colored::Colorize;
use itertools::Itertools;

use crate::middle::{
    entity::Variable,
    ir::{
        Alternate, BinaryOp, Expression, ForStatement, ForTurnStatement, FunctionDeclaration,
        IfStatement, Program, Statement, TurnDirection, UnaryOp,
    },
};

const INDENT: &str = "    ";

pub fn pretty_print_program(program: &Program) -> String {
    let mut printer = Printer::default();
    printer.block(&program.statements);
    printer.out
}

#[derive(Default)]
struct Printer {
    out: String,
    depth: usize,
}

impl Printer {
    fn line(&mut self, text: impl AsRef<str>) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn block(&mut self, statements: &[Statement]) {
        for statement in statements {
            self.statement(statement);
        }
    }

    fn nested(&mut self, statements: &[Statement]) {
        self.depth += 1;
        self.block(statements);
        self.depth -= 1;
    }

    fn statement(&mut self, statement: &Statement) {
        match statement {
            Statement::VariableDeclaration(declaration) => {
                let keyword = if declaration.variable.is_constant {
                    "all in"
                } else {
                    "hand"
                };

                self.line(format!(
                    "{} {} {} {}",
                    keyword.magenta(),
                    binding(&declaration.variable),
                    "=".white(),
                    declaration.initializer
                ));
            }
            Statement::FunctionDeclaration(declaration) => self.function(declaration),
            Statement::Assignment(assignment) => self.line(format!(
                "{} {} {}",
                assignment.target,
                "=".white(),
                assignment.source
            )),
            Statement::Increment(target) => self.line(format!("{target}{}", "++".white())),
            Statement::Decrement(target) => self.line(format!("{target}{}", "--".white())),
            Statement::Call(call) => self.line(call.to_string()),
            Statement::Break => self.line("break".magenta().to_string()),
            Statement::Return(value) => self.line(format!("{} {value}", "return".magenta())),
            Statement::ShortReturn => self.line("return".magenta().to_string()),
            Statement::If(statement) => {
                self.if_statement(statement, "if");
                self.line("}".white().to_string());
            }
            Statement::ShortIf(statement) => {
                self.line(format!("{} {} {}", "if".magenta(), statement.test, "{".white()));
                self.nested(&statement.consequent);
                self.line("}".white().to_string());
            }
            Statement::While(statement) => {
                self.line(format!("{} {} {}", "while".magenta(), statement.test, "{".white()));
                self.nested(&statement.body);
                self.line("}".white().to_string());
            }
            Statement::For(statement) => self.for_statement(statement),
            Statement::ForTurn(statement) => self.for_turn_statement(statement),
        }
    }

    fn function(&mut self, declaration: &FunctionDeclaration) {
        let function = &declaration.function;

        self.line(format!(
            "{} {}{}{}{} {} {} {}",
            "deal".magenta(),
            function.name.blue(),
            "(".white(),
            function.params.iter().map(|param| binding(param)).join(", "),
            ")".white(),
            "->".white(),
            function.return_type().to_string().yellow(),
            "{".white()
        ));
        self.nested(&declaration.body);
        self.line("}".white().to_string());
    }

    /// Else if arms continue on the closing brace line of the previous arm
    fn if_statement(&mut self, statement: &IfStatement, keyword: &str) {
        self.line(format!("{} {} {}", keyword.magenta(), statement.test, "{".white()));
        self.nested(&statement.consequent);

        match &statement.alternate {
            Alternate::If(else_if) => self.if_statement(else_if, "} else if"),
            Alternate::Else(statements) if statements.is_empty() => {}
            Alternate::Else(statements) => {
                self.line(format!("{} {}", "} else".magenta(), "{".white()));
                self.nested(statements);
            }
        }
    }

    fn for_statement(&mut self, statement: &ForStatement) {
        self.line(format!(
            "{} {} {} {} {}",
            "for".magenta(),
            binding(&statement.iterator),
            "in".magenta(),
            statement.collection,
            "{".white()
        ));
        self.nested(&statement.body);
        self.line("}".white().to_string());
    }

    fn for_turn_statement(&mut self, statement: &ForTurnStatement) {
        let direction = match statement.direction {
            TurnDirection::Ascending => "ascending",
            TurnDirection::Descending => "descending",
        };

        self.line(format!(
            "{} {} {} {}{}{}, {}, {}{} {} {}",
            "for".magenta(),
            binding(&statement.iterator),
            "in".magenta(),
            "turn".cyan(),
            "(".white(),
            statement.low,
            statement.high,
            statement.step,
            ")".white(),
            direction.cyan(),
            "{".white()
        ));
        self.nested(&statement.body);
        self.line("}".white().to_string());
    }
}

/// `name: type`
fn binding(variable: &Variable) -> String {
    format!(
        "{}{} {}",
        variable.name.blue(),
        ":".white(),
        variable.ty.to_string().yellow()
    )
}

impl core::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::IntLiteral(value) => write!(f, "{}", value.to_string().purple()),
            Expression::FloatLiteral(value) => write!(f, "{}", format!("{value:?}").purple()),
            Expression::StringLiteral(value) => write!(f, "{}", format!("{value:?}").green()),
            Expression::BoolLiteral(value) => write!(f, "{}", value.to_string().purple()),
            Expression::Variable(variable) => write!(f, "{}", variable.name.blue()),
            Expression::Function(function) => write!(f, "{}", function.name.blue()),
            Expression::Array(array) => write!(f, "[{}]", array.elements.iter().join(", ")),
            Expression::EmptyArray(_) => write!(f, "[]"),
            Expression::Object(object) => write!(
                f,
                "{{{}}}",
                object
                    .members
                    .iter()
                    .map(|member| format!("{}: {}", member.key, member.value))
                    .join(", ")
            ),
            Expression::Binary(binary) => match binary.op {
                BinaryOp::Operator(kind) => write!(
                    f,
                    "({} {} {})",
                    binary.left,
                    kind.to_string().white(),
                    binary.right
                ),
                BinaryOp::Intrinsic(intrinsic) => write!(
                    f,
                    "{}({}, {})",
                    intrinsic.to_string().cyan(),
                    binary.left,
                    binary.right
                ),
            },
            Expression::Unary(unary) => match unary.op {
                UnaryOp::Operator(kind) => {
                    write!(f, "{}{}", kind.to_string().white(), unary.operand)
                }
                UnaryOp::Intrinsic(intrinsic) => {
                    write!(f, "{}({})", intrinsic.to_string().cyan(), unary.operand)
                }
            },
            Expression::Subscript(subscript) => {
                write!(f, "{}[{}]", subscript.array, subscript.index)
            }
            Expression::Member(member) => write!(f, "{}.{}", member.object, member.field),
            Expression::Call(call) => write!(
                f,
                "{}({})",
                call.callee.name.blue(),
                call.args.iter().join(", ")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        frontend::ast::BinaryOperatorKind,
        middle::{
            entity::{Entity, Function},
            ir::{
                Assignment, ObjectExpression, ObjectMember, ShortIfStatement, VariableDeclaration,
                WhileStatement,
            },
            stdlib::STANDARD_LIBRARY,
            ty::Type,
        },
    };

    fn plain(program: &Program) -> String {
        strip_ansi_escapes::strip_str(pretty_print_program(program))
    }

    fn int(value: i64) -> Expression {
        Expression::IntLiteral(value.into())
    }

    #[test]
    fn declarations_and_expressions() {
        let x = Arc::new(Variable::mutable("x", Type::INT));
        let c = Arc::new(Variable::constant("c", Type::FLOAT));
        let Some(Entity::Function(sqrt)) = STANDARD_LIBRARY.get("sqrt") else {
            panic!("sqrt missing from the standard library");
        };

        let program = Program {
            statements: vec![
                Statement::VariableDeclaration(VariableDeclaration {
                    variable: x.clone(),
                    initializer: Expression::binary(
                        BinaryOperatorKind::Add,
                        int(1),
                        int(2),
                        Type::INT,
                    ),
                }),
                Statement::VariableDeclaration(VariableDeclaration {
                    variable: c,
                    initializer: Expression::call(sqrt.clone(), vec![Expression::FloatLiteral(2.0)]),
                }),
                Statement::Assignment(Assignment {
                    target: Expression::Variable(x.clone()),
                    source: Expression::negate(Expression::Variable(x.clone())),
                }),
                Statement::Increment(Expression::Variable(x)),
            ],
        };

        assert_eq!(
            plain(&program),
            indoc! {"
                hand x: int = (1 + 2)
                all in c: float = sqrt(2.0)
                x = -x
                x++
            "}
        );
    }

    #[test]
    fn functions_and_control_flow() {
        let n = Arc::new(Variable::read_only("n", Type::INT));
        let f = Arc::new(Function::new("f", vec![n.clone()], Some(Type::INT)));
        let flag = Arc::new(Variable::mutable("flag", Type::BOOLEAN));

        let body = vec![
            Statement::If(IfStatement {
                test: Expression::Variable(flag.clone()),
                consequent: vec![Statement::Return(Expression::Variable(n.clone()))],
                alternate: Alternate::If(Box::new(IfStatement {
                    test: Expression::binary(
                        BinaryOperatorKind::LessThan,
                        Expression::Variable(n.clone()),
                        int(0),
                        Type::BOOLEAN,
                    ),
                    consequent: vec![Statement::Return(int(0))],
                    alternate: Alternate::Else(vec![Statement::ShortReturn]),
                })),
            }),
            Statement::While(WhileStatement {
                test: Expression::Variable(flag.clone()),
                body: vec![Statement::ShortIf(ShortIfStatement {
                    test: Expression::Variable(flag),
                    consequent: vec![Statement::Break],
                })],
            }),
            Statement::Return(Expression::call(f.clone(), vec![Expression::Variable(n)])),
        ];

        let program = Program {
            statements: vec![Statement::FunctionDeclaration(FunctionDeclaration {
                function: f,
                body,
            })],
        };

        assert_eq!(
            plain(&program),
            indoc! {"
                deal f(n: int) -> int {
                    if flag {
                        return n
                    } else if (n < 0) {
                        return 0
                    } else {
                        return
                    }
                    while flag {
                        if flag {
                            break
                        }
                    }
                    return f(n)
                }
            "}
        );
    }

    #[test]
    fn loops() {
        let i = Arc::new(Variable::mutable("i", Type::INT));
        let s = Arc::new(Variable::mutable("s", Type::ANY));

        let program = Program {
            statements: vec![
                Statement::ForTurn(ForTurnStatement {
                    iterator: i.clone(),
                    low: int(5),
                    direction: TurnDirection::Descending,
                    high: int(1),
                    step: int(-1),
                    body: vec![Statement::Decrement(Expression::Variable(i))],
                }),
                Statement::For(ForStatement {
                    iterator: s.clone(),
                    collection: Expression::Object(ObjectExpression {
                        members: vec![ObjectMember {
                            key: "a".into(),
                            value: Expression::StringLiteral("b".into()),
                        }],
                    }),
                    body: vec![Statement::Assignment(Assignment {
                        target: Expression::Variable(s.clone()),
                        source: Expression::member(Expression::Variable(s), "next"),
                    })],
                }),
            ],
        };

        assert_eq!(
            plain(&program),
            indoc! {r#"
                for i: int in turn(5, 1, -1) descending {
                    i--
                }
                for s: any in {a: "b"} {
                    s = s.next
                }
            "#}
        );
    }
}
