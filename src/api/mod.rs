pub mod crosshatch;

pub use crosshatch::{__path_handle_crosshatch, __path_handle_styles};
pub use crosshatch::{
    handle_crosshatch, handle_styles, CrosshatchQuery, StyleInfo, StylesResponse, HEIGHT_HEADER,
    STYLE_HEADER, WIDTH_HEADER,
};
