// Print an argon2id PHC hash for seeding the users table.
//
// Usage: hash-password <password>
//    or: echo -n <password> | hash-password

use std::io::Read;

fn main() -> anyhow::Result<()> {
    let password = match std::env::args().nth(1) {
        Some(arg) => arg,
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            input.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    if password.is_empty() {
        anyhow::bail!("password must not be empty");
    }

    println!("{}", cinedex_common::hash_password(&password)?);
    Ok(())
}
