//! Command-line interface for the braid cipher.

#![forbid(unsafe_code)]

use std::io::Read;

use anyhow::{bail, Context, Result};
use braid_text::{decrypt_text, encrypt_text, CipherOptions, Framing};
use clap::{Parser, Subcommand};

/// Braid cipher CLI.
#[derive(Parser)]
#[command(
    name = "braid",
    version,
    author,
    about = "Keyed block cipher over text with a dash-and-dot hex wire format"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt text into the hex wire format.
    Enc {
        /// Plaintext; read from stdin when omitted.
        #[arg(value_name = "TEXT")]
        text: Option<String>,
        /// Key text; without it blocks are framed but not keyed.
        #[arg(long, value_name = "KEY")]
        key: Option<String>,
        /// Plaintext block width in bits.
        #[arg(long, default_value_t = 48, value_name = "BITS")]
        block_size: u32,
        /// Digit width in bits inside the engine.
        #[arg(long, default_value_t = 8, value_name = "BITS")]
        sub_block_size: u32,
        /// Frame text over an alphabet instead of UTF-8 bytes;
        /// `printable` selects the printable ASCII set.
        #[arg(long, value_name = "printable|CHARS")]
        alphabet: Option<String>,
        /// Frame the key over an alphabet instead of UTF-8 bytes.
        #[arg(long, value_name = "printable|CHARS")]
        key_alphabet: Option<String>,
    },
    /// Decrypt the hex wire format back into text.
    Dec {
        /// Ciphertext; read from stdin when omitted.
        #[arg(value_name = "HEX")]
        ciphertext: Option<String>,
        /// Key text; must match the one used to encrypt.
        #[arg(long, value_name = "KEY")]
        key: Option<String>,
        /// Plaintext block width in bits.
        #[arg(long, default_value_t = 48, value_name = "BITS")]
        block_size: u32,
        /// Digit width in bits inside the engine.
        #[arg(long, default_value_t = 8, value_name = "BITS")]
        sub_block_size: u32,
        /// Frame text over an alphabet instead of UTF-8 bytes;
        /// `printable` selects the printable ASCII set.
        #[arg(long, value_name = "printable|CHARS")]
        alphabet: Option<String>,
        /// Frame the key over an alphabet instead of UTF-8 bytes.
        #[arg(long, value_name = "printable|CHARS")]
        key_alphabet: Option<String>,
    },
    /// Run a local demo: encrypt a message, decrypt it back, print both.
    Demo {
        /// Demo plaintext.
        #[arg(long, default_value = "Hello")]
        text: String,
        /// Demo key.
        #[arg(long, default_value = "secret")]
        key: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Enc {
            text,
            key,
            block_size,
            sub_block_size,
            alphabet,
            key_alphabet,
        } => {
            let options = build_options(block_size, sub_block_size, alphabet, key_alphabet);
            cmd_enc(text, key.as_deref(), &options)
        }
        Commands::Dec {
            ciphertext,
            key,
            block_size,
            sub_block_size,
            alphabet,
            key_alphabet,
        } => {
            let options = build_options(block_size, sub_block_size, alphabet, key_alphabet);
            cmd_dec(ciphertext, key.as_deref(), &options)
        }
        Commands::Demo { text, key } => cmd_demo(&text, &key),
    }
}

fn cmd_enc(text: Option<String>, key: Option<&str>, options: &CipherOptions) -> Result<()> {
    let text = read_argument_or_stdin(text)?;
    let sealed = encrypt_text(&text, key, options).context("encrypt text")?;
    println!("{}", sealed);
    Ok(())
}

fn cmd_dec(ciphertext: Option<String>, key: Option<&str>, options: &CipherOptions) -> Result<()> {
    let ciphertext = read_argument_or_stdin(ciphertext)?;
    let opened = decrypt_text(&ciphertext, key, options).context("decrypt ciphertext")?;
    println!("{}", opened);
    Ok(())
}

fn cmd_demo(text: &str, key: &str) -> Result<()> {
    let options = CipherOptions::default();
    let sealed = encrypt_text(text, Some(key), &options).context("encrypt text")?;
    let opened = decrypt_text(&sealed, Some(key), &options).context("decrypt ciphertext")?;
    println!("plaintext: {}", text);
    println!("ciphertext: {}", sealed);
    println!("decrypted: {}", opened);
    if opened != text {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn build_options(
    block_size: u32,
    sub_block_size: u32,
    alphabet: Option<String>,
    key_alphabet: Option<String>,
) -> CipherOptions {
    CipherOptions {
        block_size,
        sub_block_size,
        text_framing: framing_for(alphabet),
        key_framing: framing_for(key_alphabet),
    }
}

fn framing_for(alphabet: Option<String>) -> Framing {
    match alphabet {
        None => Framing::Utf8,
        Some(value) if value == "printable" => Framing::printable_ascii(),
        Some(chars) => Framing::Alphabet { chars, blank: true },
    }
}

fn read_argument_or_stdin(argument: Option<String>) -> Result<String> {
    match argument {
        Some(text) => Ok(text),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("read stdin")?;
            if buffer.ends_with('\n') {
                buffer.pop();
                if buffer.ends_with('\r') {
                    buffer.pop();
                }
            }
            Ok(buffer)
        }
    }
}
