pub mod split_bar;

pub use split_bar::SplitBar;
