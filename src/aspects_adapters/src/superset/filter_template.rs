//! Placeholder expansion for row-level-security filters.
//!
//! Supported placeholders: `{course.course_id}`, `{course.course_id.org}`,
//! `{course.course_id.course}`, `{course.course_id.run}`, `{course.display_name}`,
//! `{user.username}`, `{user.id}` and `{user.email}`. `{{` and `}}` are literal braces.

use aspects_core::{Course, GuestTokenError, Principal};

pub fn render_filter(
    template: &str,
    course: &Course,
    principal: &Principal,
) -> Result<String, GuestTokenError> {
    let invalid = |reason: &str| GuestTokenError::InvalidFilterTemplate {
        template: template.to_string(),
        reason: reason.to_string(),
    };

    let mut rendered = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                rendered.push('{');
            }
            '{' => {
                let mut field = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') => return Err(invalid("unexpected '{' in field name")),
                        Some(c) => field.push(c),
                        None => return Err(invalid("expected '}' before end of string")),
                    }
                }
                let value = lookup(&field, course, principal)
                    .ok_or_else(|| invalid(&format!("unknown placeholder '{field}'")))?;
                rendered.push_str(&value);
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                rendered.push('}');
            }
            '}' => return Err(invalid("single '}' encountered")),
            c => rendered.push(c),
        }
    }

    Ok(rendered)
}

fn lookup(field: &str, course: &Course, principal: &Principal) -> Option<String> {
    let course_key = course.course_id();
    let value = match field {
        "course.course_id" => course_key.to_string(),
        "course.course_id.org" => course_key.org().to_string(),
        "course.course_id.course" => course_key.course().to_string(),
        "course.course_id.run" => course_key.run().to_string(),
        "course.display_name" => course.display_name().to_string(),
        "user.username" => principal.username().to_string(),
        "user.id" => principal.user_id().to_string(),
        "user.email" => principal.email().unwrap_or_default().to_string(),
        _ => return None,
    };
    Some(value)
}
