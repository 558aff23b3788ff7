use pretty_assertions::assert_eq;

use super::*;
use crate::{
    error::{AnalysisErrorKind, ArityMismatch, MissingAnnotation, NumericUsage},
    frontend::ast::{
        BinaryOperatorKind::*,
        TypeName,
        build::*,
    },
    middle::{
        ir::{Alternate, Expression, Statement, TurnDirection},
        stdlib::Intrinsic,
        ty::Type,
    },
};

fn analyze_ok(statements: Vec<crate::frontend::ast::Statement>) -> Program {
    match analyze(&program(statements), &AnalyzerOptions::default()) {
        Ok(program) => program,
        Err(error) => panic!("analysis failed: {error}"),
    }
}

fn analyze_err(statements: Vec<crate::frontend::ast::Statement>) -> AnalysisErrorKind {
    analyze_err_with(statements, AnalyzerOptions::default())
}

fn analyze_err_with(
    statements: Vec<crate::frontend::ast::Statement>,
    options: AnalyzerOptions,
) -> AnalysisErrorKind {
    match analyze(&program(statements), &options) {
        Ok(program) => panic!("analysis succeeded: {program:?}"),
        Err(error) => error.kind,
    }
}

fn function_declaration(program: &Program, index: usize) -> &crate::middle::ir::FunctionDeclaration {
    match &program.statements[index] {
        Statement::FunctionDeclaration(declaration) => declaration,
        statement => panic!("expected a function declaration, found {statement:?}"),
    }
}

#[test]
fn variables_take_the_type_of_their_initializer() {
    let program = analyze_ok(vec![
        var("x", int(1)),
        var("y", binary(id("x"), Add, float(2.5))),
        all_in("z", string("hi")),
    ]);

    let types = program
        .statements
        .iter()
        .map(|statement| match statement {
            Statement::VariableDeclaration(declaration) => declaration.variable.ty.clone(),
            statement => panic!("expected a declaration, found {statement:?}"),
        })
        .collect::<Vec<_>>();

    assert_eq!(types, vec![Type::INT, Type::FLOAT, Type::STRING]);
}

#[test]
fn redeclaring_in_the_same_scope_fails() {
    let kind = analyze_err(vec![var("x", int(1)), all_in("x", int(2))]);
    assert_eq!(kind, AnalysisErrorKind::DuplicateDeclaration { name: "x".into() });
}

#[test]
fn shadowing_an_enclosing_scope_succeeds() {
    analyze_ok(vec![
        var("x", int(1)),
        while_loop(boolean(false), vec![var("x", string("inner"))]),
        fun("f", vec![param("x")], None, vec![var("sqrt", int(0))]),
        var("π", int(3)),
    ]);
}

#[test]
fn undeclared_identifiers_fail() {
    let kind = analyze_err(vec![var("x", id("y"))]);
    assert_eq!(kind, AnalysisErrorKind::UndeclaredIdentifier { name: "y".into() });
}

#[test]
fn constant_reassignment_differs_from_read_only() {
    let kind = analyze_err(vec![all_in("x", int(1)), assign(id("x"), int(2))]);
    assert_eq!(kind, AnalysisErrorKind::ConstantReassignment { name: "x".into() });

    let kind = analyze_err(vec![fun(
        "f",
        vec![param("p")],
        None,
        vec![assign(id("p"), int(2))],
    )]);
    assert_eq!(kind, AnalysisErrorKind::ReadOnly { name: "p".into() });

    let kind = analyze_err(vec![assign(id("π"), float(3.0))]);
    assert_eq!(kind.to_string(), "π is read only");
}

#[test]
fn elements_of_mutable_arrays_are_assignable() {
    analyze_ok(vec![
        var("a", array(vec![int(1), int(2)])),
        assign(subscript(id("a"), int(0)), int(5)),
        increment(subscript(id("a"), int(1))),
    ]);

    let kind = analyze_err(vec![
        all_in("a", array(vec![int(1)])),
        assign(subscript(id("a"), int(0)), int(5)),
    ]);
    assert_eq!(kind, AnalysisErrorKind::ConstantReassignment { name: "a".into() });
}

#[test]
fn bump_requires_a_mutable_number() {
    let kind = analyze_err(vec![var("s", string("x")), increment(id("s"))]);
    assert_eq!(
        kind,
        AnalysisErrorKind::NotNumeric(NumericUsage::Bump {
            found: Type::STRING
        })
    );

    let kind = analyze_err(vec![all_in("n", int(1)), decrement(id("n"))]);
    assert_eq!(kind, AnalysisErrorKind::ConstantReassignment { name: "n".into() });

    let program = analyze_ok(vec![var("n", float(1.0)), decrement(id("n"))]);
    assert!(matches!(program.statements[1], Statement::Decrement(_)));
}

#[test]
fn break_only_inside_loops() {
    let kind = analyze_err(vec![break_statement()]);
    assert_eq!(kind, AnalysisErrorKind::BreakOutsideLoop);

    let kind = analyze_err(vec![
        while_loop(boolean(true), vec![break_statement()]),
        break_statement(),
    ]);
    assert_eq!(kind, AnalysisErrorKind::BreakOutsideLoop);

    analyze_ok(vec![for_in(
        "x",
        array(vec![int(1)]),
        vec![short_if(boolean(true), vec![break_statement()])],
    )]);
}

#[test]
fn break_in_a_function_inside_a_loop_is_still_in_the_loop() {
    analyze_ok(vec![while_loop(
        boolean(true),
        vec![fun("f", Vec::new(), None, vec![break_statement()])],
    )]);
}

#[test]
fn return_only_inside_functions() {
    let kind = analyze_err(vec![return_statement(int(1))]);
    assert_eq!(kind, AnalysisErrorKind::ReturnOutsideFunction);

    let kind = analyze_err(vec![short_return()]);
    assert_eq!(kind, AnalysisErrorKind::ReturnOutsideFunction);
}

#[test]
fn conditions_must_be_boolean() {
    let kind = analyze_err(vec![short_if(int(1), Vec::new())]);
    assert_eq!(kind, AnalysisErrorKind::NotBoolean { found: Type::INT });

    let kind = analyze_err(vec![while_loop(string("yes"), Vec::new())]);
    assert_eq!(kind, AnalysisErrorKind::NotBoolean { found: Type::STRING });
}

#[test]
fn else_if_chains_nest_if_statements() {
    let program = analyze_ok(vec![
        var("x", int(1)),
        if_else_if(
            binary(id("x"), Equals, int(1)),
            vec![call_statement("raise", vec![string("one")])],
            if_stmt(binary(id("x"), Equals, int(2)), Vec::new(), None),
        ),
    ]);

    let Statement::If(statement) = &program.statements[1] else {
        panic!("expected an if statement");
    };
    let Alternate::If(else_if) = &statement.alternate else {
        panic!("expected an else if");
    };
    assert_eq!(else_if.alternate, Alternate::Else(Vec::new()));
}

#[test]
fn short_if_without_else() {
    let program = analyze_ok(vec![short_if(boolean(true), vec![var("x", int(1))])]);
    assert!(matches!(program.statements[0], Statement::ShortIf(_)));
}

#[test]
fn turn_requires_three_arguments() {
    let kind = analyze_err(vec![for_turn("i", vec![int(1), int(2)], Vec::new())]);
    assert_eq!(kind, AnalysisErrorKind::ArityMismatch(ArityMismatch::Turn { actual: 2 }));
    assert_eq!(kind.to_string(), "TurnCall requires exactly three parameters");
}

#[test]
fn turn_rejects_zero_steps() {
    for step in [int(0), float(0.0), negate(int(0))] {
        let kind = analyze_err(vec![for_turn("i", vec![int(1), int(5), step], Vec::new())]);
        assert_eq!(kind, AnalysisErrorKind::ZeroStep);
    }
}

#[test]
fn turn_direction_follows_the_step_sign() {
    let program = analyze_ok(vec![
        for_turn("i", vec![int(1), int(5), int(2)], Vec::new()),
        for_turn("i", vec![int(5), int(1), negate(int(1))], Vec::new()),
        for_turn("i", vec![int(5), float(1.5), float(-0.5)], Vec::new()),
    ]);

    let turns = program
        .statements
        .iter()
        .map(|statement| match statement {
            Statement::ForTurn(turn) => (turn.direction, turn.iterator.ty.clone()),
            statement => panic!("expected a for turn, found {statement:?}"),
        })
        .collect::<Vec<_>>();

    assert_eq!(
        turns,
        vec![
            (TurnDirection::Ascending, Type::INT),
            (TurnDirection::Descending, Type::INT),
            (TurnDirection::Descending, Type::FLOAT),
        ]
    );
}

#[test]
fn turn_bounds_do_not_see_the_iterator() {
    let kind = analyze_err(vec![for_turn("i", vec![int(1), id("i"), int(1)], Vec::new())]);
    assert_eq!(kind, AnalysisErrorKind::UndeclaredIdentifier { name: "i".into() });
}

#[test]
fn for_in_iterator_takes_the_element_type() {
    let program = analyze_ok(vec![for_in(
        "c",
        array(vec![string("a"), string("b")]),
        vec![assign(id("c"), string("z"))],
    )]);

    let Statement::For(statement) = &program.statements[0] else {
        panic!("expected a for statement");
    };
    assert_eq!(statement.iterator.ty, Type::STRING);
    assert!(statement.iterator.mutable);
}

#[test]
fn iterators_leave_scope_with_the_loop() {
    let kind = analyze_err(vec![
        for_in("c", array(vec![int(1)]), Vec::new()),
        var("x", id("c")),
    ]);
    assert_eq!(kind, AnalysisErrorKind::UndeclaredIdentifier { name: "c".into() });
}

#[test]
fn arithmetic_promotes_and_checks_operands() {
    let program = analyze_ok(vec![var("x", binary(int(1), Multiply, float(2.0)))]);
    let Statement::VariableDeclaration(declaration) = &program.statements[0] else {
        panic!("expected a declaration");
    };
    assert_eq!(declaration.initializer.ty(), Type::FLOAT);

    let kind = analyze_err(vec![var("x", binary(int(1), Add, boolean(true)))]);
    assert_eq!(kind.to_string(), "Expression type mismatch: int vs boolean");

    let kind = analyze_err(vec![var("x", binary(string("a"), LessThan, int(1)))]);
    assert_eq!(
        kind,
        AnalysisErrorKind::TypeMismatch {
            left: Type::STRING,
            right: Type::INT
        }
    );
}

#[test]
fn any_operands_are_accepted() {
    let program = analyze_ok(vec![fun(
        "f",
        vec![param("a")],
        None,
        vec![return_statement(binary(id("a"), Add, int(1)))],
    )]);

    assert_eq!(function_declaration(&program, 0).function.return_type(), Type::ANY);
}

#[test]
fn comparisons_are_boolean() {
    let program = analyze_ok(vec![var("b", binary(int(1), LessThanOrEqualTo, float(2.0)))]);
    let Statement::VariableDeclaration(declaration) = &program.statements[0] else {
        panic!("expected a declaration");
    };
    assert_eq!(declaration.variable.ty, Type::BOOLEAN);
}

#[test]
fn functions_cannot_be_operands() {
    let kind = analyze_err(vec![
        fun("f", Vec::new(), None, Vec::new()),
        var("x", binary(id("f"), Add, int(1))),
    ]);
    assert_eq!(kind, AnalysisErrorKind::FunctionInExpression);
}

#[test]
fn logical_operands_checked_only_when_strict() {
    let statements = || vec![var("x", binary(int(1), LogicalAnd, boolean(true)))];

    analyze_ok(statements());

    let kind = analyze_err_with(statements(), AnalyzerOptions::strict());
    assert_eq!(kind, AnalysisErrorKind::NotBoolean { found: Type::INT });
}

#[test]
fn calls_check_callee_and_arity() {
    let kind = analyze_err(vec![var("x", int(1)), call_statement("x", Vec::new())]);
    assert_eq!(kind, AnalysisErrorKind::NotCallable);

    let kind = analyze_err(vec![
        fun("f", vec![param("a"), param("b")], None, Vec::new()),
        call_statement("f", vec![int(1)]),
    ]);
    assert_eq!(kind.to_string(), "2 argument(s) required but 1 passed");

    let kind = analyze_err(vec![call_statement("hypot", vec![int(1)])]);
    assert_eq!(
        kind,
        AnalysisErrorKind::ArityMismatch(ArityMismatch::Call {
            expected: 2,
            actual: 1
        })
    );
}

#[test]
fn raise_takes_any_number_of_arguments() {
    let program = analyze_ok(vec![
        call_statement("raise", Vec::new()),
        call_statement("raise", vec![int(1), string("two"), boolean(true)]),
    ]);

    assert!(matches!(
        &program.statements[1],
        Statement::Call(Expression::Call(call)) if call.args.len() == 3
    ));
}

#[test]
fn math_intrinsics_require_numbers() {
    let kind = analyze_err(vec![var("x", call("sqrt", vec![string("four")]))]);
    assert_eq!(
        kind,
        AnalysisErrorKind::NotNumeric(NumericUsage::IntrinsicArgument {
            intrinsic: Intrinsic::Sqrt,
            found: Type::STRING
        })
    );

    let program = analyze_ok(vec![var("b", call("bytes", vec![string("four")]))]);
    let Statement::VariableDeclaration(declaration) = &program.statements[0] else {
        panic!("expected a declaration");
    };
    assert_eq!(declaration.variable.ty, Type::array(Type::INT));
}

#[test]
fn subscripting_scalars_fails() {
    let kind = analyze_err(vec![var("x", int(1)), var("y", subscript(id("x"), int(0)))]);
    assert_eq!(kind, AnalysisErrorKind::NotSubscriptable { found: Type::INT });
    assert_eq!(kind.to_string(), "Cannot subscript a value of type int");

    analyze_ok(vec![var("s", string("abc")), var("c", subscript(id("s"), int(0)))]);
}

#[test]
fn member_access_and_objects_are_untyped() {
    let program = analyze_ok(vec![
        var("o", object(vec![("a", int(1)), ("b", string("x"))])),
        var("a", member(id("o"), "a")),
    ]);

    let Statement::VariableDeclaration(declaration) = &program.statements[1] else {
        panic!("expected a declaration");
    };
    assert_eq!(declaration.variable.ty, Type::ANY);
}

#[test]
fn empty_arrays_have_any_elements() {
    let program = analyze_ok(vec![var("a", array(Vec::new()))]);
    let Statement::VariableDeclaration(declaration) = &program.statements[0] else {
        panic!("expected a declaration");
    };
    assert_eq!(declaration.initializer, Expression::EmptyArray(Type::ANY));
}

#[test]
fn duplicate_parameters_fail() {
    let kind = analyze_err(vec![fun("f", vec![param("a"), param("a")], None, Vec::new())]);
    assert_eq!(kind, AnalysisErrorKind::DuplicateParameter { name: "a".into() });
}

#[test]
fn function_names_collide_with_variables() {
    let kind = analyze_err(vec![var("f", int(1)), fun("f", Vec::new(), None, Vec::new())]);
    assert_eq!(kind, AnalysisErrorKind::DuplicateDeclaration { name: "f".into() });
}

#[test]
fn parameters_default_to_any_and_are_read_only() {
    let program = analyze_ok(vec![fun(
        "f",
        vec![param("a"), typed_param("b", &[TypeName::Int, TypeName::Float])],
        None,
        Vec::new(),
    )]);

    let function = &function_declaration(&program, 0).function;
    assert_eq!(function.params[0].ty, Type::ANY);
    assert_eq!(function.params[1].ty, Type::union([Type::INT, Type::FLOAT]));
    assert!(function.params.iter().all(|p| !p.mutable));
}

#[test]
fn return_type_without_returns_is_any() {
    let program = analyze_ok(vec![fun("f", Vec::new(), None, vec![short_return()])]);
    assert_eq!(function_declaration(&program, 0).function.return_type(), Type::ANY);
}

#[test]
fn return_types_are_inferred_from_every_branch() {
    let program = analyze_ok(vec![fun(
        "f",
        vec![typed_param("n", &[TypeName::Int])],
        None,
        vec![
            if_else(
                binary(id("n"), GreaterThan, int(0)),
                vec![return_statement(int(1))],
                vec![while_loop(
                    boolean(true),
                    vec![return_statement(string("loop"))],
                )],
            ),
            return_statement(int(2)),
        ],
    )]);

    assert_eq!(
        function_declaration(&program, 0).function.return_type(),
        Type::union([Type::STRING, Type::INT])
    );
}

#[test]
fn too_many_return_types_become_any() {
    let program = analyze_ok(vec![fun(
        "f",
        vec![param("n")],
        None,
        vec![
            short_if(id("n"), vec![return_statement(int(1))]),
            short_if(id("n"), vec![return_statement(float(1.0))]),
            short_if(id("n"), vec![return_statement(string("1"))]),
            return_statement(boolean(true)),
        ],
    )]);

    assert_eq!(function_declaration(&program, 0).function.return_type(), Type::ANY);
}

#[test]
fn nested_function_returns_do_not_leak() {
    let program = analyze_ok(vec![fun(
        "outer",
        Vec::new(),
        None,
        vec![
            fun("inner", Vec::new(), None, vec![return_statement(string("s"))]),
            return_statement(int(1)),
        ],
    )]);

    assert_eq!(function_declaration(&program, 0).function.return_type(), Type::INT);
}

#[test]
fn returns_must_match_the_annotation() {
    let kind = analyze_err(vec![fun(
        "f",
        Vec::new(),
        Some(&[TypeName::Int, TypeName::Float]),
        vec![return_statement(string("nope"))],
    )]);

    assert_eq!(
        kind,
        AnalysisErrorKind::ReturnTypeMismatch {
            function: "f".into(),
            expected: vec![Type::INT, Type::FLOAT],
            found: Type::STRING,
        }
    );
}

#[test]
fn annotated_return_type_is_the_annotation() {
    let program = analyze_ok(vec![fun(
        "f",
        Vec::new(),
        Some(&[TypeName::Int, TypeName::Int, TypeName::Float]),
        vec![return_statement(int(1))],
    )]);

    assert_eq!(
        function_declaration(&program, 0).function.return_type(),
        Type::union([Type::INT, Type::FLOAT])
    );
}

fn factorial(params: Vec<crate::frontend::ast::Param>, annotated: bool) -> crate::frontend::ast::Statement {
    fun(
        "fact",
        params,
        annotated.then_some(&[TypeName::Int][..]),
        vec![
            short_if(
                binary(id("n"), LessThanOrEqualTo, int(1)),
                vec![return_statement(int(1))],
            ),
            return_statement(binary(
                id("n"),
                Multiply,
                call("fact", vec![binary(id("n"), Subtract, int(1))]),
            )),
        ],
    )
}

#[test]
fn recursive_functions_need_a_return_annotation() {
    let kind = analyze_err(vec![factorial(vec![typed_param("n", &[TypeName::Int])], false)]);

    assert_eq!(
        kind,
        AnalysisErrorKind::MissingRecursiveAnnotation {
            function: "fact".into(),
            missing: MissingAnnotation::ReturnType,
        }
    );
}

#[test]
fn recursive_functions_need_parameter_annotations() {
    let kind = analyze_err(vec![factorial(vec![param("n")], true)]);

    assert_eq!(
        kind,
        AnalysisErrorKind::MissingRecursiveAnnotation {
            function: "fact".into(),
            missing: MissingAnnotation::Parameters(vec!["n".into()]),
        }
    );
}

#[test]
fn annotated_recursive_functions_analyze() {
    let program = analyze_ok(vec![factorial(vec![typed_param("n", &[TypeName::Int])], true)]);
    assert_eq!(function_declaration(&program, 0).function.return_type(), Type::INT);
}

#[test]
fn self_calls_from_nested_functions_are_recursion() {
    let kind = analyze_err(vec![fun(
        "f",
        Vec::new(),
        None,
        vec![fun("g", Vec::new(), None, vec![call_statement("f", Vec::new())])],
    )]);

    assert_eq!(
        kind,
        AnalysisErrorKind::MissingRecursiveAnnotation {
            function: "f".into(),
            missing: MissingAnnotation::ReturnType,
        }
    );
}

#[test]
fn mutual_recursion_is_not_detected() {
    // g only reaches itself through f, so it needs no annotations
    let program = analyze_ok(vec![fun(
        "f",
        vec![typed_param("n", &[TypeName::Int])],
        Some(&[TypeName::Int]),
        vec![
            fun(
                "g",
                vec![param("m")],
                None,
                vec![return_statement(call("f", vec![id("m")]))],
            ),
            return_statement(call("g", vec![id("n")])),
        ],
    )]);

    let f = function_declaration(&program, 0);
    let Statement::FunctionDeclaration(g) = &f.body[0] else {
        panic!("expected g to be declared first in f");
    };
    assert_eq!(g.function.return_type(), Type::INT);
    assert_eq!(f.function.return_type(), Type::INT);
}

#[test]
fn functions_cannot_call_ahead_of_their_declaration() {
    let kind = analyze_err(vec![
        fun("f", Vec::new(), None, vec![call_statement("g", Vec::new())]),
        fun("g", Vec::new(), None, vec![call_statement("f", Vec::new())]),
    ]);

    assert_eq!(kind, AnalysisErrorKind::UndeclaredIdentifier { name: "g".into() });
}

#[test]
fn mentioning_a_function_without_calling_it_is_not_recursion() {
    analyze_ok(vec![fun(
        "f",
        Vec::new(),
        None,
        vec![
            var("g", id("f")),
            call_statement("raise", vec![string("f(")]),
        ],
    )]);
}

#[test]
fn intrinsic_calls_lower_to_operators() {
    let program = analyze_ok(vec![
        var("a", call("sqrt", vec![int(16)])),
        var("b", call("max", vec![int(1), float(2.0)])),
    ]);

    let initializers = program
        .statements
        .iter()
        .map(|statement| match statement {
            Statement::VariableDeclaration(declaration) => &declaration.initializer,
            statement => panic!("expected a declaration, found {statement:?}"),
        })
        .collect::<Vec<_>>();

    assert!(matches!(initializers[0], Expression::Unary(_)));
    assert!(matches!(initializers[1], Expression::Binary(_)));
    assert!(initializers.iter().all(|e| e.ty() == Type::FLOAT));
}
