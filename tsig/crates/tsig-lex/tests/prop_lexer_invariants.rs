use proptest::prelude::*;
use tsig_lex::Lexer;

/// Runs the lexer to completion (or first error) and returns whether it
/// terminated without panicking, plus the number of tokens it produced.
fn drain(source: &str) -> usize {
    let mut lexer = Lexer::new(source);
    let mut count = 0;
    loop {
        match lexer.next_token() {
            Ok(tok) if tok.is_eof() => break,
            Ok(_) => count += 1,
            Err(_) => break,
        }
        // A lexer that never advances on an error path would loop forever;
        // bound the run so a regression fails the test instead of hanging.
        if count > 100_000 {
            break;
        }
    }
    count
}

proptest! {
    #[test]
    fn lexer_never_panics_on_arbitrary_unicode(s in ".{0,200}") {
        let _ = drain(&s);
    }

    #[test]
    fn lexer_never_panics_on_signature_like_chars(
        s in "[a-zA-Z0-9_ \\t\\n(){}\\[\\]<>:,.?!@$%&|^*=~`\"'+-]{0,200}"
    ) {
        let _ = drain(&s);
    }

    #[test]
    fn every_token_range_is_non_decreasing(
        s in "[a-zA-Z0-9_ \\n(){}\\[\\]:,.]{0,200}"
    ) {
        let mut lexer = Lexer::new(&s);
        let mut last_end_byte = 0usize;
        loop {
            match lexer.next_token() {
                Ok(tok) if tok.is_eof() => break,
                Ok(tok) => {
                    prop_assert!(tok.range.start.byte_offset() >= last_end_byte);
                    last_end_byte = tok.range.end.byte_offset();
                }
                Err(_) => break,
            }
        }
    }
}
