pub mod reorder;
pub mod view;

pub use reorder::weave_visible_order;
pub use view::project;
