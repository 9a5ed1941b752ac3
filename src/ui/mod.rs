pub mod board;
pub mod click_areas;
pub mod components;
pub mod transition;
