use thiserror::Error;

#[derive(Debug, Error)]
pub enum StructuralError {
    #[error(
        "image {width}x{height} is smaller than the {window}x{window} comparison window"
    )]
    ImageTooSmall {
        width: u32,
        height: u32,
        window: usize,
    },
}
