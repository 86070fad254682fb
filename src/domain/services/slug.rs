use rand::{distributions::Alphanumeric, Rng};

/// ASCII-folding slug for tenant URLs: lowercased, accents stripped,
/// non-alphanumerics collapsed to single hyphens.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_dash = true;

    for c in name.chars() {
        let folded = fold_char(c);
        if folded.is_ascii_alphanumeric() {
            slug.push(folded.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

fn fold_char(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' | 'Í' | 'Ì' | 'Î' | 'Ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' | 'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' | 'Ú' | 'Ù' | 'Û' | 'Ü' => 'u',
        'ç' | 'Ç' => 'c',
        'ñ' | 'Ñ' => 'n',
        _ => c,
    }
}

/// Placeholder address for shadow clients created without an email. The
/// random suffix keeps retries cheap; the caller still verifies tenant
/// uniqueness before inserting.
pub fn synthetic_manual_email(name: &str) -> String {
    let base = slugify(name);
    let base = if base.is_empty() { "cliente".to_string() } else { base };

    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();

    format!("{}.{}@manual.local", base, suffix.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_fold_accents_and_spaces() {
        assert_eq!(slugify("Barbearia São João"), "barbearia-sao-joao");
        assert_eq!(slugify("  Corte & Cia.  "), "corte-cia");
    }

    #[test]
    fn synthetic_email_lands_in_manual_local() {
        let email = synthetic_manual_email("João Telefone Apenas");
        assert!(email.starts_with("joao-telefone-apenas."));
        assert!(email.ends_with("@manual.local"));
    }

    #[test]
    fn empty_names_still_produce_an_address() {
        let email = synthetic_manual_email("!!!");
        assert!(email.starts_with("cliente."));
        assert!(email.ends_with("@manual.local"));
    }
}
