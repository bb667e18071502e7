extern crate encap_rsa;

use encap_rsa::{decapsulate, encapsulate, generate_keys, Result};

fn run(digits: u32, salt: &str) -> Result<bool> {
    let (public_key, private_key) = generate_keys(digits, salt)?;
    println!("Encoded Public Key (ek): {}", public_key);
    println!("Encoded Private Key (dk): {}", private_key);

    let (ciphertext, secret) = encapsulate(&public_key, salt)?;
    println!("Encoded Encapsulated Value (c): {}", ciphertext);
    println!("Encoded Original Random Value (K): {}", secret);

    let recovered = decapsulate(&ciphertext, &private_key, salt)?;
    println!("Encoded Decapsulated Value (K): {}", recovered);

    Ok(recovered == secret)
}

fn main() {
    match run(10, "secure_salt") {
        Ok(true) => println!("Decapsulation successful!"),
        Ok(false) => eprintln!("Error: Decapsulation failed!"),
        Err(err) => eprintln!("Error: {}", err),
    }
}
