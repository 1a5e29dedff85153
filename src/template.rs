use std::collections::HashMap;

use regex::Regex;

use crate::errors::*;

/// Plain key/value placeholder substitution for the packaging templates.
///
/// `$name` and `${name}` are replaced with the supplied value, `$$` yields
/// a literal dollar. There is no nesting and no conditionals. Substitution
/// is strict: a placeholder without a value is an error, as is a `$` that
/// starts neither a placeholder nor an escape, so no placeholder can
/// survive into the output unnoticed.
pub fn substitute(template: &str, vars: &HashMap<&str, String>) -> Result<String> {
    let re =
        Regex::new(r"\$(?:(\$)|([A-Za-z_][A-Za-z0-9_]*)|\{([A-Za-z_][A-Za-z0-9_]*)\}|())").unwrap();

    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    for caps in re.captures_iter(template) {
        let m = caps.get(0).unwrap();
        out.push_str(&template[last..m.start()]);
        last = m.end();

        if caps.get(1).is_some() {
            out.push('$');
        } else if let Some(name) = caps.get(2).or_else(|| caps.get(3)) {
            match vars.get(name.as_str()) {
                Some(value) => out.push_str(value),
                None => debjdk_bail!("No value for placeholder ${}", name.as_str()),
            }
        } else {
            let line = template[..m.start()].matches('\n').count() + 1;
            debjdk_bail!("Invalid placeholder on line {}", line);
        }
    }
    out.push_str(&template[last..]);

    Ok(out)
}
