/// Implements `DecoratorNode` for a node that keeps its child in a
/// `child: Option<BoxedNode>` field.
macro_rules! impl_decorator_node {
    ($t:ty) => {
        impl $crate::nodes::DecoratorNode for $t {
            fn set_child(&mut self, child: $crate::nodes::BoxedNode) {
                self.child = Some(child);
            }

            fn child(&self) -> Option<&dyn $crate::nodes::TreeNode> {
                self.child.as_deref()
            }

            fn into_node(self: Box<Self>) -> $crate::nodes::BoxedNode {
                self
            }
        }
    };
}
pub(crate) use impl_decorator_node;

/// Implements `ControlNode` for a node that keeps its children in a
/// `children: Vec<BoxedNode>` field.
macro_rules! impl_control_node {
    ($t:ty) => {
        impl $crate::nodes::ControlNode for $t {
            fn add_child(&mut self, child: $crate::nodes::BoxedNode) {
                self.children.push(child);
            }

            fn children(&self) -> &[$crate::nodes::BoxedNode] {
                &self.children
            }

            fn children_mut(&mut self) -> &mut [$crate::nodes::BoxedNode] {
                &mut self.children
            }

            fn into_node(self: Box<Self>) -> $crate::nodes::BoxedNode {
                self
            }
        }
    };
}
pub(crate) use impl_control_node;
