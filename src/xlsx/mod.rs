mod workbook;

pub use workbook::XlsxRenderer;
