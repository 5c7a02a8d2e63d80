//! `${name}` placeholder extraction from request body templates.

/// Collect the distinct placeholder names in `template`, in first-appearance
/// order, skipping any name listed in `reserved`.
///
/// Reserved names are the session/token variables a data source binds from
/// its login response; callers render those separately instead of asking the
/// user to fill them. A placeholder is `${` followed by word characters and a
/// closing `}`; anything else is left alone.
pub fn extract_variables(template: &str, reserved: &[String]) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let mut chars = template.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '$' || chars.peek() != Some(&'{') {
            continue;
        }
        chars.next();
        let mut name = String::new();
        let mut closed = false;
        while let Some(&next) = chars.peek() {
            if next == '}' {
                chars.next();
                closed = true;
                break;
            }
            if next.is_alphanumeric() || next == '_' {
                name.push(next);
                chars.next();
            } else {
                break;
            }
        }
        if closed
            && !name.is_empty()
            && !reserved.iter().any(|r| r == &name)
            && !found.contains(&name)
        {
            found.push(name);
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reserved(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_extracts_in_order() {
        let template = r#"{"a":"${First}","b":"${Second}","c":"${First}"}"#;
        assert_eq!(extract_variables(template, &[]), vec!["First", "Second"]);
    }

    #[test]
    fn test_reserved_names_excluded() {
        let template = r#"{"Session":"${SessionID}","Dept":"${DeptID}"}"#;
        let vars = extract_variables(template, &reserved(&["SessionID"]));
        assert_eq!(vars, vec!["DeptID"]);
    }

    #[test]
    fn test_empty_template() {
        assert!(extract_variables("", &[]).is_empty());
    }

    #[test]
    fn test_malformed_placeholders_ignored() {
        assert!(extract_variables("${unclosed", &[]).is_empty());
        assert!(extract_variables("${}", &[]).is_empty());
        assert!(extract_variables("$ {spaced}", &[]).is_empty());
        assert_eq!(
            extract_variables("${bad name} ${good_name}", &[]),
            vec!["good_name"]
        );
    }

    #[test]
    fn test_dollar_without_brace() {
        assert!(extract_variables("cost is $100", &[]).is_empty());
    }
}
