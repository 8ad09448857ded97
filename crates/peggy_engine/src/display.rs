//! PEG notation for matchers.
//!
//! ```text
//! 'lit'  /re/  [a-z]  .  (a b)  (a|b)  a*  a+  a?  &a  !a  ~a
//! ```
//!
//! A matcher met again while it is still being printed is written as its
//! name, so recursive grammars print finitely. Forwards print their delegate.

use std::collections::HashSet;
use std::fmt::{self, Write};

use crate::matcher::{Kind, Matcher, MatcherId};

struct Printer {
    active: HashSet<MatcherId>,
}

impl Printer {
    fn write(&mut self, f: &mut fmt::Formatter<'_>, matcher: &Matcher) -> fmt::Result {
        if !self.active.insert(matcher.id()) {
            return f.write_str(&matcher.name());
        }
        let result = self.write_kind(f, matcher);
        self.active.remove(&matcher.id());
        result
    }

    fn write_list(
        &mut self,
        f: &mut fmt::Formatter<'_>,
        items: &[Matcher],
        separator: &str,
    ) -> fmt::Result {
        f.write_char('(')?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                f.write_str(separator)?;
            }
            self.write(f, item)?;
        }
        f.write_char(')')
    }

    fn write_kind(&mut self, f: &mut fmt::Formatter<'_>, matcher: &Matcher) -> fmt::Result {
        match matcher.kind() {
            Kind::Literal(pattern) => write!(f, "'{}'", pattern.escape_debug()),
            Kind::Regex { pattern, .. } => write!(f, "/{pattern}/"),
            Kind::Range { from, to } if from == to => write!(f, "[{}]", from.escape_debug()),
            Kind::Range { from, to } => {
                write!(f, "[{}-{}]", from.escape_debug(), to.escape_debug())
            }
            Kind::Any => f.write_char('.'),
            Kind::Sequence(items) => self.write_list(f, &items.borrow(), " "),
            Kind::Choice(alternatives) => self.write_list(f, &alternatives.borrow(), "|"),
            Kind::Star(operand) => {
                self.write(f, &operand.borrow())?;
                f.write_char('*')
            }
            Kind::Plus(_) => {
                self.write_operand(f, matcher)?;
                f.write_char('+')
            }
            Kind::Optional(_) => {
                self.write_operand(f, matcher)?;
                f.write_char('?')
            }
            Kind::And(operand) => {
                f.write_char('&')?;
                self.write(f, &operand.borrow())
            }
            Kind::Not(operand) => {
                f.write_char('!')?;
                self.write(f, &operand.borrow())
            }
            Kind::Ignore(operand) => {
                f.write_char('~')?;
                self.write(f, &operand.borrow())
            }
            Kind::Forward(delegate) => match delegate.borrow().as_ref() {
                Some(target) => self.write(f, target),
                None => write!(f, "<{}>", matcher.name()),
            },
        }
    }

    fn write_operand(&mut self, f: &mut fmt::Formatter<'_>, matcher: &Matcher) -> fmt::Result {
        match matcher.operands().first() {
            Some(operand) => self.write(f, operand),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer {
            active: HashSet::new(),
        }
        .write(f, self)
    }
}
