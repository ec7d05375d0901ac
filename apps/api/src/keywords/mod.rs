// Keyword suggestion from page text: tokenize, drop stopwords, rank by frequency.
// Everything here is pure; the handlers supply text and options per request.

pub mod extractor;
pub mod handlers;
pub mod normalizer;
pub mod stopwords;
