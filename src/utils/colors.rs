/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

use crate::models::Category;

/// One color per category in list output.
pub fn color_for_category(category: Category) -> &'static str {
    match category {
        Category::CommunityService => BLUE,
        Category::Education => CYAN,
        Category::Environment => GREEN,
        Category::SeniorCare => MAGENTA,
        Category::Healthcare => RED,
        Category::AnimalCare => YELLOW,
        Category::Other => GREY,
    }
}
