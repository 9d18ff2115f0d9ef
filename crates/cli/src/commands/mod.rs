pub mod canonicalize;
pub mod evaluate;
pub mod infer;
pub mod normalize;
