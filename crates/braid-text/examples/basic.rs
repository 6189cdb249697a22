//! Encrypts and decrypts a short message with the default options.

use braid_text::{decrypt_text, encrypt_text, CipherOptions, Framing};

fn main() {
    let options = CipherOptions::default();
    let sealed = encrypt_text("Hello", Some("secret"), &options).unwrap();
    let opened = decrypt_text(&sealed, Some("secret"), &options).unwrap();
    assert_eq!(opened, "Hello");
    println!("ciphertext: {}", sealed);
    println!("decrypted: {}", opened);

    // Same message framed over printable ASCII instead of UTF-8 bytes.
    let alphabet = CipherOptions {
        text_framing: Framing::printable_ascii(),
        ..CipherOptions::default()
    };
    let sealed = encrypt_text("Hello", Some("secret"), &alphabet).unwrap();
    assert_eq!(decrypt_text(&sealed, Some("secret"), &alphabet).unwrap(), "Hello");
    println!("alphabet ciphertext: {}", sealed);
}
