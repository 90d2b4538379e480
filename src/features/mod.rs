mod extractor;

pub use extractor::FeatureExtractor;
