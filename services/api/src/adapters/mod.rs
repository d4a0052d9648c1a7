pub mod spoonacular;
pub mod sst;
pub mod tts;

pub use spoonacular::SpoonacularAdapter;
pub use sst::OpenAiSstAdapter;
pub use tts::OpenAiTtsAdapter;
