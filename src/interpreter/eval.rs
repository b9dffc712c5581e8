use tracing::{debug, trace};

use crate::error::{Result, RuntimeError, Stuck};
use crate::factory;
use crate::term::{Node, Sequence, Term};

use super::entities::EntityStore;
use super::{Interpreter, rules};

impl Interpreter {
    /// Perform one micro-step of `term`.
    ///
    /// 1. A sequence reduces its first element that can make a step.
    /// 2. A node drives its first reducible eager parameter to a value,
    ///    rolling the entity store back and trying the next one if that
    ///    parameter gets stuck.
    /// 3. Once every eager parameter is a value the operator's own rules
    ///    produce the successor term.
    ///
    /// Values are returned unchanged.
    pub fn step(&mut self, term: &Term) -> Result<Term> {
        match term {
            Term::Seq(items) => Ok(self
                .reduce_one_element(items)?
                .map_or_else(|| term.clone(), Term::Seq)),
            Term::Spread(items) => Ok(self
                .reduce_one_element(items)?
                .map_or_else(|| term.clone(), Term::Spread)),
            Term::Node(node) => {
                self.charge()?;
                trace!(operator = node.op.name(), step = self.steps, "step");
                self.step_node(node)
            }
            _ => Ok(term.clone()),
        }
    }

    /// Repeat [`step`](Self::step) until `term` is a value.
    pub fn run(&mut self, term: Term) -> Result<Term> {
        let mut current = term;
        while current.is_reducible() {
            current = self.advance(&current)?;
        }
        Ok(current)
    }

    /// One step of a run-to-fixpoint loop.
    ///
    /// With stall detection enabled, a step that changes neither the term
    /// nor any entity is reported as stuck instead of being repeated.
    pub(crate) fn advance(&mut self, term: &Term) -> Result<Term> {
        let before = self
            .config
            .stall_detection
            .then(|| self.entities.snapshot());
        let next = self.step(term)?;

        if let Some(before) = before {
            if next == *term && EntityStore::snapshots_equal(&before, &self.entities.snapshot()) {
                debug!(operator = term.operator_name(), "no progress");
                return Err(Stuck::new(term.operator_name())
                    .because("no progress")
                    .into());
            }
        }
        Ok(next)
    }

    /// Step the first element of `items` that can make a step.
    ///
    /// Returns `None` when every element is already a value. An element
    /// that gets stuck is rolled back and the next one is tried.
    pub(crate) fn reduce_one_element(&mut self, items: &Sequence) -> Result<Option<Sequence>> {
        let mut blocked = None;
        for (index, item) in items.iter().enumerate() {
            if item.is_value() {
                continue;
            }
            let snapshot = self.entities.snapshot();
            match self.step(item) {
                Ok(next) => return Ok(Some(items.replace(index, next))),
                Err(RuntimeError::Stuck(stuck)) => {
                    self.entities.restore(snapshot);
                    debug!(index, %stuck, "sequence element rolled back");
                    blocked = Some(stuck);
                }
                Err(other) => return Err(other),
            }
        }

        match blocked {
            Some(cause) => Err(Stuck::new("sequence")
                .because(format!("no element can be reduced ({cause})"))
                .into()),
            None => Ok(None),
        }
    }

    fn step_node(&mut self, node: &Node) -> Result<Term> {
        let mut blocked = None;
        for (index, param) in node.op.params().iter().enumerate() {
            let Some(arg) = node.params.get(index) else {
                break;
            };
            if !param.is_eager() || arg.is_value() {
                continue;
            }

            let snapshot = self.entities.snapshot();
            let attempt = self
                .run(arg.clone())
                .and_then(|value| self.replace_param(node, index, value));
            match attempt {
                Ok(next) => return Ok(next),
                Err(RuntimeError::Stuck(stuck)) => {
                    self.entities.restore(snapshot);
                    debug!(
                        operator = node.op.name(),
                        index,
                        %stuck,
                        "eager parameter rolled back"
                    );
                    blocked = Some(stuck);
                }
                Err(other) => return Err(other),
            }
        }

        if let Some(cause) = blocked {
            return Err(Stuck::new(node.op.name())
                .because(format!("no eager parameter can be reduced ({cause})"))
                .into());
        }
        rules::apply(self, node)
    }

    /// Put the reduced `value` of parameter `index` back into `node`.
    ///
    /// A spread in a fixed slot is spliced and the parameters re-bound; when
    /// the spliced arguments do not fit the operator's shape it is stuck.
    fn replace_param(&self, node: &Node, index: usize, value: Term) -> Result<Term> {
        let spliced = node
            .op
            .params()
            .get(index)
            .is_some_and(|param| !param.is_sequence());

        let params = match value {
            Term::Spread(items) if spliced => {
                let flat = factory::flatten_params(node.op, &node.params, index, items);
                factory::bind(node.op, flat).map_err(|err| {
                    Stuck::new(node.op.name())
                        .because(format!("spliced arguments do not fit ({err})"))
                })?
            }
            value => {
                let mut params = node.params.clone();
                params[index] = value;
                params
            }
        };
        Ok(Term::node(node.op, params))
    }

    fn charge(&mut self) -> Result<()> {
        self.steps += 1;
        match self.config.step_limit {
            Some(limit) if self.steps > limit => Err(RuntimeError::StepLimitExceeded { limit }),
            _ => Ok(()),
        }
    }
}
