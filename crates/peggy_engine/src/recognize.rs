//! Memoized dispatch and per-variant recognition.
//!
//! [`Matcher::match_at`] is the only way into recognition. It consults the
//! session's memo table first and runs the variant's recognizer only for a
//! (matcher, position) pair that has not been tried, so each pair is
//! recognized at most once per session however often backtracking returns
//! to it.

use peggy_foundation::Source;

use crate::matcher::{Kind, Matcher};
use crate::memo::Memoized;
use crate::node::{Node, NodeBuilder};
use crate::session::Session;

impl Matcher {
    /// Matches at `position` in `session`.
    ///
    /// Returns the result node, or `None` for no match. The outcome is cached
    /// in the session's memo table either way.
    pub fn match_at<S: Source>(&self, session: &mut Session<S>, position: usize) -> Option<Node> {
        let id = self.id();
        if let Some(cached) = session.memo_mut().lookup(id, position) {
            session
                .tracer_mut()
                .memo_hit(self, position, cached.is_match());
            return cached.into_node();
        }

        session.tracer_mut().attempt(self, position);
        let outcome = self.recognize(session, position);
        match &outcome {
            Some(node) => session.tracer_mut().matched(self, position, node.len()),
            None => session.tracer_mut().no_match(self, position),
        }

        session
            .memo_mut()
            .insert(id, position, Memoized::from(outcome.clone()));
        outcome
    }

    /// Matches at the session cursor without moving it.
    pub fn match_here<S: Source>(&self, session: &mut Session<S>) -> Option<Node> {
        let position = session.position();
        self.match_at(session, position)
    }

    /// Matches at the start of `input` in a fresh session.
    #[must_use]
    pub fn parse(&self, input: &str) -> Option<Node> {
        let mut session = Session::new(input);
        self.match_at(&mut session, 0)
    }

    /// Like [`Matcher::parse`], but succeeds only if the whole input is
    /// consumed.
    #[must_use]
    pub fn parse_all(&self, input: &str) -> Option<Node> {
        self.parse(input).filter(|node| node.end() == input.len())
    }

    fn recognize<S: Source>(&self, session: &mut Session<S>, position: usize) -> Option<Node> {
        match self.kind() {
            Kind::Literal(pattern) => session
                .source()
                .starts_with_at(position, pattern)
                .then(|| Node::leaf(self, position, pattern.clone())),

            Kind::Regex { regex, .. } => {
                let text = {
                    let window = session.source().window(position)?;
                    regex.find(&window)?.as_str().to_string()
                };
                Some(Node::leaf(self, position, text))
            }

            Kind::Range { from, to } => {
                let c = session.source().char_at(position)?;
                (*from <= c && c <= *to).then(|| Node::leaf(self, position, c.to_string()))
            }

            Kind::Any => {
                let c = session.source().char_at(position)?;
                Some(Node::leaf(self, position, c.to_string()))
            }

            Kind::Sequence(items) => {
                let mut builder = NodeBuilder::new(self, position);
                for item in items.borrow().iter() {
                    let child = item.match_at(session, builder.end())?;
                    builder.push(child)?;
                }
                Some(builder.finish())
            }

            Kind::Choice(alternatives) => {
                let winner = alternatives
                    .borrow()
                    .iter()
                    .find_map(|alternative| alternative.match_at(session, position))?;
                let mut builder = NodeBuilder::new(self, position);
                builder.push(winner)?;
                Some(builder.finish())
            }

            Kind::Star(operand) => {
                let operand = operand.borrow();
                let mut builder = NodeBuilder::new(self, position);
                while let Some(child) = operand.match_at(session, builder.end()) {
                    // A zero-length repetition would repeat forever.
                    if child.is_empty() {
                        break;
                    }
                    builder.push(child)?;
                }
                Some(builder.finish())
            }

            Kind::Plus(expansion) | Kind::Optional(expansion) => expansion
                .borrow()
                .match_at(session, position)
                .map(|node| node.reowned(self)),

            Kind::And(operand) => operand
                .borrow()
                .match_at(session, position)
                .map(|_| Node::zero_width(self, position)),

            Kind::Not(operand) => match operand.borrow().match_at(session, position) {
                Some(_) => None,
                None => Some(Node::zero_width(self, position)),
            },

            Kind::Ignore(operand) => operand
                .borrow()
                .match_at(session, position)
                .map(|inner| Node::ignored(self, inner)),

            Kind::Forward(delegate) => {
                let delegate = delegate.borrow().clone();
                match delegate {
                    Some(target) => target.match_at(session, position),
                    None => {
                        session.tracer_mut().undefined_forward(self, position);
                        None
                    }
                }
            }
        }
    }
}
