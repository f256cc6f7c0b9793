use super::Expr;

/// An iterator that traverses the expression tree in left-to-right
/// post-order (i.e. depth-first), yielding every node including the leaves.
///
/// This iterator is created by [`Expr::post_order_iter`].
pub struct ExprIter<'a> {
    stack: Vec<(&'a Expr, bool)>,
}

impl<'a> ExprIter<'a> {
    pub(crate) fn new(expr: &'a Expr) -> Self {
        Self { stack: vec![(expr, false)] }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (expr, expanded) = self.stack.pop()?;
            match expr {
                Expr::Scalar(_) | Expr::Var(_) => return Some(expr),
                Expr::Func(func) => {
                    if expanded {
                        return Some(expr);
                    }

                    // revisit this node once both children are exhausted
                    self.stack.push((expr, true));
                    self.stack.push((&func.right, false));
                    self.stack.push((&func.left, false));
                },
            }
        }
    }
}
