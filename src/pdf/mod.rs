mod typst;

pub use typst::TypstRenderer;
