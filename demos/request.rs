use shorthand::{FieldRules, RequestRules, ShorthandError};

fn main() -> Result<(), ShorthandError> {
    let rules = RequestRules::from_sections([
        (
            "query",
            FieldRules::new()
                .field("page", "integer|min:1")
                .field("sort", "in:name,created"),
        ),
        (
            "request",
            FieldRules::new()
                .field("name.first_name", "required|min:6")
                .field("name.last_name", "min:1")
                .field("email", "required|email")
                .field("tags.0.slug", "required|alpha_dash"),
        ),
    ])?;

    let resolved = rules.resolve()?;
    if let Some(query) = &resolved.query {
        println!("query:   {query}");
    }
    if let Some(request) = &resolved.request {
        println!("request: {request}");
    }

    // Anything but `query` and `request` is rejected
    if let Err(err) = RequestRules::from_sections([("headers", FieldRules::new())]) {
        println!("error:   {err}");
    }
    Ok(())
}
