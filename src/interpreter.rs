use std::io::{BufRead, Write};

use log::debug;

use crate::ast::Program;
use crate::lexer::Lexer;
use crate::parser;
use crate::runtime::error::RuntimeResult;
use crate::runtime::execution::{Closure, Context};

mod error;
mod runtime;

pub use error::MythonError;

/// Tree-walking executor for parsed programs.
///
/// Every `print` of the program is written to the sink given at construction.
pub struct Interpreter<'a> {
    output: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        Self { output }
    }

    /// Executes `program` in a fresh top-level scope.
    ///
    /// A top-level `return` with a non-None value ends the run early without
    /// error.
    pub fn run(&mut self, program: &Program) -> RuntimeResult<()> {
        debug!(
            "running program with {} top-level statements",
            program.statements.len()
        );
        let mut globals = Closure::new();
        let mut context = Context::new(&mut *self.output);
        runtime::execute_block(&program.statements, &mut globals, &mut context)?;
        debug!("program finished with {} global bindings", globals.len());
        Ok(())
    }
}

/// Lexes, parses and runs the Mython source read from `input`.
pub fn run_program(input: impl BufRead, output: &mut dyn Write) -> Result<(), MythonError> {
    let program = parser::parse_program(Lexer::new(input)?)?;
    Interpreter::new(output).run(&program)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::LexError;
    use crate::parser::ParseError;
    use crate::runtime::RuntimeError;
    use indoc::indoc;

    fn run(source: &str) -> (Result<(), MythonError>, String) {
        let mut output = Vec::new();
        let result = run_program(source.as_bytes(), &mut output);
        (result, String::from_utf8(output).expect("utf8 output"))
    }

    fn run_ok(source: &str) -> String {
        let (result, output) = run(source);
        result.expect("program failed");
        output
    }

    #[test]
    fn simple_prints() {
        let input = indoc! {"
            print 57
            print 10, 24, -8
            print 'hello'
            print \"world\"
            print True, False
            print
            print None
        "};
        assert_eq!(
            run_ok(input),
            "57\n10 24 -8\nhello\nworld\nTrue False\n\nNone\n"
        );
    }

    #[test]
    fn assignments_rebind_names() {
        let input = indoc! {"
            x = 57
            print x
            x = 'C++ black belt'
            print x
            y = False
            x = y
            print x
            x = None
            print x, y
        "};
        assert_eq!(run_ok(input), "57\nC++ black belt\nFalse\nNone False\n");
    }

    #[test]
    fn arithmetic() {
        let input = "print 1+2+3+4+5, 1*2*3*4*5, 1-2-3-4-5, 36/4/3, 2*5+10/2\n";
        assert_eq!(run_ok(input), "15 120 -13 3 15\n");
    }

    #[test]
    fn variables_are_pointers() {
        let input = indoc! {"
            class Counter:
              def __init__():
                self.value = 0

              def add():
                self.value = self.value + 1

            class Dummy:
              def do_add(counter):
                counter.add()

            x = Counter()
            y = x

            x.add()
            y.add()

            print x.value

            d = Dummy()
            d.do_add(x)

            print y.value
        "};
        assert_eq!(run_ok(input), "2\n3\n");
    }

    #[test]
    fn class_without_init_has_no_fields() {
        let input = indoc! {"
            class Empty:
              def describe():
                return 'empty'

            e = Empty()
            print e.describe()
            print Empty
        "};
        assert_eq!(run_ok(input), "empty\nClass Empty\n");
    }

    #[test]
    fn inheritance_and_str() {
        let input = indoc! {"
            class Shape:
              def __str__():
                return 'Shape'

              def area():
                return 'Not implemented'

            class Rect(Shape):
              def __init__(w, h):
                self.w = w
                self.h = h

              def __str__():
                return 'Rect(' + str(self.w) + 'x' + str(self.h) + ')'

              def area():
                return self.w * self.h

            class Square(Rect):
              def __init__(side):
                self.w = side
                self.h = side

            s = Shape()
            r = Rect(10, 20)
            q = Square(3)
            print s, s.area()
            print r, r.area()
            print q, q.area()
        "};
        assert_eq!(
            run_ok(input),
            "Shape Not implemented\nRect(10x20) 200\nRect(3x3) 9\n"
        );
    }

    #[test]
    fn early_return_through_conditionals() {
        let input = indoc! {"
            class Sign:
              def of(x):
                if x > 0:
                  return 'positive'
                else:
                  if x < 0:
                    return 'negative'
                return 'zero'

              def nothing():
                x = 1

            s = Sign()
            print s.of(5), s.of(-3), s.of(0)
            print s.nothing()
        "};
        assert_eq!(run_ok(input), "positive negative zero\nNone\n");
    }

    #[test]
    fn recursive_method_calls() {
        let input = indoc! {"
            class Math:
              def fact(n):
                if n <= 1:
                  return 1
                return n * self.fact(n - 1)

            m = Math()
            print m.fact(10)
        "};
        assert_eq!(run_ok(input), "3628800\n");
    }

    #[test]
    fn operator_overloading() {
        let input = indoc! {"
            class Money:
              def __init__(amount):
                self.amount = amount

              def __add__(other):
                return self.amount + other.amount

              def __str__():
                return str(self.amount) + ' EUR'

            a = Money(5)
            print a, a + Money(7)
        "};
        assert_eq!(run_ok(input), "5 EUR 12\n");
    }

    #[test]
    fn logic_and_comparisons() {
        let input = indoc! {"
            x = 4
            print x == 4, x != 4, x < 5, x > 5, x <= 4, x >= 5
            print 'abc' < 'abd', not x, x and '', 0 or 'yes'
            if x > 2 and x < 10:
              print 'in range'
            else:
              print 'out of range'
        "};
        assert_eq!(
            run_ok(input),
            "True False True False True False\nTrue False False True\nin range\n"
        );
    }

    #[test]
    fn top_level_return_stops_silently() {
        let input = indoc! {"
            print 1
            return 2
            print 3
        "};
        assert_eq!(run_ok(input), "1\n");
    }

    #[test]
    fn runtime_error_keeps_earlier_output() {
        let (result, output) = run("print 1\nprint 1/0\nprint 2\n");
        assert_eq!(
            result,
            Err(MythonError::Runtime(RuntimeError::DivisionByZero))
        );
        assert_eq!(output, "1\n");
    }

    #[test]
    fn reports_runtime_errors() {
        let (result, _) = run("print y\n");
        assert_eq!(
            result,
            Err(MythonError::Runtime(RuntimeError::UnknownVariable {
                name: "y".to_string()
            }))
        );

        let input = indoc! {"
            class Point:
              def __init__(x):
                self.x = x

            p = Point()
        "};
        assert!(matches!(
            run(input).0,
            Err(MythonError::Runtime(RuntimeError::MethodNotFound { arity: 0, .. }))
        ));

        let input = indoc! {"
            Point = 1
            class Point:
              def f():
                return 1
        "};
        assert!(matches!(
            run(input).0,
            Err(MythonError::Runtime(RuntimeError::ClassRedefinition { .. }))
        ));

        assert!(matches!(
            run("print 1 + 'a'\n").0,
            Err(MythonError::Runtime(RuntimeError::UnsupportedOperands { .. }))
        ));
    }

    #[test]
    fn frontend_errors_produce_no_output() {
        let (result, output) = run("print 1\nprint foo()\n");
        assert!(matches!(
            result,
            Err(MythonError::Parse(ParseError::FreeFunction { .. }))
        ));
        assert_eq!(output, "");

        let (result, output) = run("print 1\nprint $\n");
        assert!(matches!(
            result,
            Err(MythonError::Lex(LexError::UnrecognizedToken { line: 2, .. }))
        ));
        assert_eq!(output, "");
    }

    #[test]
    fn interpreter_runs_are_independent() {
        let program = parser::parse("x = 1\nprint x\n").expect("parse failed");
        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);
        interpreter.run(&program).expect("first run");
        interpreter.run(&program).expect("second run");
        assert_eq!(String::from_utf8(output).expect("utf8"), "1\n1\n");
    }
}
