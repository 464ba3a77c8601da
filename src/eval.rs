use crate::context::EvaluationContext;
use crate::expr::Formula;
use crate::node::{Connective, Node};
use crate::reference::ExprId;

impl Formula {
    /// Evaluate the whole formula under `ctx`.
    pub fn evaluate(&self, ctx: &EvaluationContext) -> bool {
        self.evaluate_node(self.root(), ctx)
    }

    /// Evaluate the subtree at `id` under `ctx`.
    ///
    /// `And` and `Or` short-circuit left to right. `Impl` and `BiImpl` always
    /// evaluate both operands.
    pub fn evaluate_node(&self, id: ExprId, ctx: &EvaluationContext) -> bool {
        match self.node(id) {
            Node::Constant(value) => *value,
            Node::Predicate(name) => ctx.get(name),
            Node::Not(a) => !self.evaluate_node(*a, ctx),
            Node::Binary(Connective::And, a, b) => {
                self.evaluate_node(*a, ctx) && self.evaluate_node(*b, ctx)
            }
            Node::Binary(Connective::Or, a, b) => {
                self.evaluate_node(*a, ctx) || self.evaluate_node(*b, ctx)
            }
            Node::Binary(op, a, b) => {
                let lhs = self.evaluate_node(*a, ctx);
                let rhs = self.evaluate_node(*b, ctx);
                op.apply(lhs, rhs)
            }
        }
    }
}
