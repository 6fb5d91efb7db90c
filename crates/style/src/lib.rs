pub mod border;
pub mod dimension;
pub mod font;
pub mod list;
pub mod parsers;
pub mod stylesheet;
pub mod text;

pub use border::{Border, BorderStyle};
pub use dimension::{Margins, PageLayout, PageSize};
pub use font::FontWeight;
pub use list::ListStyleType;
pub use parsers::StyleParseError;
pub use stylesheet::{BlockStyle, StyleTable};
pub use text::TextAlign;
