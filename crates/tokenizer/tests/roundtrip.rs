use pairgram_tokenizer::{
    io, ModelFormat, Token, Tokenizer, TokenizerError, TokenizerLoader, TokenizerSaver,
    FIRST_TOKEN,
};
use tempdir::TempDir;

const SAMPLE: &[u8] = b"It was the best of times, it was the worst of times,\n\
it was the age of wisdom, it was the age of foolishness,\n\
it was the epoch of belief, it was the epoch of incredulity.\n";

#[test]
fn encode_save_load_decode() {
    let dir = TempDir::new("pairgram_roundtrip").unwrap();
    let text_path = dir.path().join("input.txt");
    let table_path = dir.path().join("table.bin");
    let tokens_path = dir.path().join("tokens.bin");
    let output_path = dir.path().join("output.txt");

    io::write_text(&text_path, SAMPLE).unwrap();

    let mut tokenizer = Tokenizer::default();
    let input = io::read_text(&text_path).unwrap();
    let encoding = tokenizer.encode(&input).unwrap();
    assert!(encoding.stats.encoded_len < encoding.stats.initial_len);

    tokenizer.save(&table_path, ModelFormat::Raw).unwrap();
    io::write_tokens(&tokens_path, &encoding.tokens).unwrap();

    let loaded = Tokenizer::load(&table_path, ModelFormat::Raw).unwrap();
    assert_eq!(loaded.table(), tokenizer.table());

    let tokens = io::read_tokens(&tokens_path).unwrap();
    let (text, stats) = loaded.decode(&tokens).unwrap();
    io::write_text(&output_path, &text).unwrap();

    assert_eq!(stats.byte_count, SAMPLE.len());
    assert_eq!(io::read_text(&output_path).unwrap(), SAMPLE);
}

#[test]
fn reference_example_on_disk() {
    let dir = TempDir::new("pairgram_roundtrip").unwrap();
    let table_path = dir.path().join("table.bin");
    let tokens_path = dir.path().join("tokens.bin");

    let mut tokenizer = Tokenizer::default();
    let encoding = tokenizer.encode(b"aaabdaaabac").unwrap();
    tokenizer.save(&table_path, ModelFormat::Raw).unwrap();
    io::write_tokens(&tokens_path, &encoding.tokens).unwrap();

    let (a, b, c, d) = (b'a' as Token, b'b' as Token, b'c' as Token, b'd' as Token);
    let table = io::read_table(&table_path).unwrap();
    assert_eq!(
        table.pairs(),
        &[(a, a), (FIRST_TOKEN, a), (FIRST_TOKEN + 1, b)]
    );
    assert_eq!(
        io::read_tokens(&tokens_path).unwrap(),
        vec![FIRST_TOKEN + 2, d, FIRST_TOKEN + 2, a, c]
    );

    assert_eq!(std::fs::metadata(&table_path).unwrap().len(), 12);
    assert_eq!(std::fs::metadata(&tokens_path).unwrap().len(), 10);
}

#[test]
fn json_model_matches_raw_files() {
    let dir = TempDir::new("pairgram_roundtrip").unwrap();
    let json_path = dir.path().join("model.json");

    let mut tokenizer = Tokenizer::default();
    let encoding = tokenizer.encode(SAMPLE).unwrap();

    TokenizerSaver::new(tokenizer.table())
        .with_tokens(&encoding.tokens)
        .save_json(&json_path)
        .unwrap();

    let (table, tokens) = TokenizerLoader::load_json(&json_path).unwrap();
    assert_eq!(&table, tokenizer.table());
    assert_eq!(tokens.as_deref(), Some(encoding.tokens.as_slice()));

    let document: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(document["first_token"], 128);
}

#[test]
fn generated_tokens_decode() {
    let dir = TempDir::new("pairgram_roundtrip").unwrap();
    let tokens_path = dir.path().join("generated.bin");

    let mut tokenizer = Tokenizer::builder().seed(2024).build().unwrap();
    tokenizer.encode(SAMPLE).unwrap();

    let tokens = tokenizer.generate(40).unwrap();
    io::write_tokens(&tokens_path, &tokens).unwrap();

    let reloaded = io::read_tokens(&tokens_path).unwrap();
    assert_eq!(reloaded, tokens);

    let (text, _) = tokenizer.decode(&reloaded).unwrap();
    assert!(text.iter().all(u8::is_ascii));
}

#[test]
fn decode_with_wrong_table_fails() {
    let mut tokenizer = Tokenizer::default();
    let encoding = tokenizer.encode(SAMPLE).unwrap();

    let other = Tokenizer::default();
    let err = other.decode(&encoding.tokens).unwrap_err();
    assert!(matches!(err, TokenizerError::TokenOutOfRange { .. }));
}
