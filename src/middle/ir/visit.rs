//! Trait definition for an IR visitor which walks the tree in DFS order

use super::{
    Alternate, Assignment, Expression, ForStatement, ForTurnStatement, FunctionCall,
    FunctionDeclaration, IfStatement, Statement, VariableDeclaration,
};

pub trait Visitor: Sized {
    fn visit_block(&mut self, statements: &[Statement]) {
        walk_block(self, statements)
    }

    fn visit_statement(&mut self, statement: &Statement) {
        walk_statement(self, statement)
    }

    fn visit_variable_declaration(&mut self, declaration: &VariableDeclaration) {
        walk_variable_declaration(self, declaration)
    }

    fn visit_function_declaration(&mut self, declaration: &FunctionDeclaration) {
        walk_function_declaration(self, declaration)
    }

    fn visit_assignment(&mut self, assignment: &Assignment) {
        walk_assignment(self, assignment)
    }

    fn visit_return(&mut self, expression: &Expression) {
        self.visit_expression(expression)
    }

    fn visit_if_statement(&mut self, statement: &IfStatement) {
        walk_if_statement(self, statement)
    }

    fn visit_for_statement(&mut self, statement: &ForStatement) {
        walk_for_statement(self, statement)
    }

    fn visit_for_turn_statement(&mut self, statement: &ForTurnStatement) {
        walk_for_turn_statement(self, statement)
    }

    fn visit_expression(&mut self, expression: &Expression) {
        walk_expression(self, expression)
    }

    fn visit_function_call(&mut self, call: &FunctionCall) {
        walk_function_call(self, call)
    }
}

pub fn walk_block(visitor: &mut impl Visitor, statements: &[Statement]) {
    for statement in statements {
        visitor.visit_statement(statement);
    }
}

pub fn walk_statement(visitor: &mut impl Visitor, statement: &Statement) {
    match statement {
        Statement::VariableDeclaration(declaration) => {
            visitor.visit_variable_declaration(declaration)
        }
        Statement::FunctionDeclaration(declaration) => {
            visitor.visit_function_declaration(declaration)
        }
        Statement::Assignment(assignment) => visitor.visit_assignment(assignment),
        Statement::Increment(target) | Statement::Decrement(target) => {
            visitor.visit_expression(target)
        }
        Statement::Call(call) => visitor.visit_expression(call),
        Statement::Break | Statement::ShortReturn => {}
        Statement::Return(expression) => visitor.visit_return(expression),
        Statement::If(statement) => visitor.visit_if_statement(statement),
        Statement::ShortIf(statement) => {
            visitor.visit_expression(&statement.test);
            visitor.visit_block(&statement.consequent);
        }
        Statement::While(statement) => {
            visitor.visit_expression(&statement.test);
            visitor.visit_block(&statement.body);
        }
        Statement::For(statement) => visitor.visit_for_statement(statement),
        Statement::ForTurn(statement) => visitor.visit_for_turn_statement(statement),
    }
}

pub fn walk_variable_declaration(visitor: &mut impl Visitor, declaration: &VariableDeclaration) {
    visitor.visit_expression(&declaration.initializer);
}

pub fn walk_function_declaration(visitor: &mut impl Visitor, declaration: &FunctionDeclaration) {
    visitor.visit_block(&declaration.body);
}

pub fn walk_assignment(visitor: &mut impl Visitor, assignment: &Assignment) {
    visitor.visit_expression(&assignment.target);
    visitor.visit_expression(&assignment.source);
}

pub fn walk_if_statement(visitor: &mut impl Visitor, statement: &IfStatement) {
    visitor.visit_expression(&statement.test);
    visitor.visit_block(&statement.consequent);

    match &statement.alternate {
        Alternate::If(alternate) => visitor.visit_if_statement(alternate),
        Alternate::Else(statements) => visitor.visit_block(statements),
    }
}

pub fn walk_for_statement(visitor: &mut impl Visitor, statement: &ForStatement) {
    visitor.visit_expression(&statement.collection);
    visitor.visit_block(&statement.body);
}

pub fn walk_for_turn_statement(visitor: &mut impl Visitor, statement: &ForTurnStatement) {
    visitor.visit_expression(&statement.low);
    visitor.visit_expression(&statement.high);
    visitor.visit_expression(&statement.step);
    visitor.visit_block(&statement.body);
}

pub fn walk_expression(visitor: &mut impl Visitor, expression: &Expression) {
    match expression {
        Expression::IntLiteral(_)
        | Expression::FloatLiteral(_)
        | Expression::StringLiteral(_)
        | Expression::BoolLiteral(_)
        | Expression::Variable(_)
        | Expression::Function(_)
        | Expression::EmptyArray(_) => {}
        Expression::Array(array) => {
            for element in &array.elements {
                visitor.visit_expression(element);
            }
        }
        Expression::Object(object) => {
            for member in &object.members {
                visitor.visit_expression(&member.value);
            }
        }
        Expression::Binary(binary) => {
            visitor.visit_expression(&binary.left);
            visitor.visit_expression(&binary.right);
        }
        Expression::Unary(unary) => visitor.visit_expression(&unary.operand),
        Expression::Subscript(subscript) => {
            visitor.visit_expression(&subscript.array);
            visitor.visit_expression(&subscript.index);
        }
        Expression::Member(member) => visitor.visit_expression(&member.object),
        Expression::Call(call) => visitor.visit_function_call(call),
    }
}

pub fn walk_function_call(visitor: &mut impl Visitor, call: &FunctionCall) {
    for arg in &call.args {
        visitor.visit_expression(arg);
    }
}
