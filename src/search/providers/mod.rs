mod giphy;

pub use self::giphy::GiphyProvider;
