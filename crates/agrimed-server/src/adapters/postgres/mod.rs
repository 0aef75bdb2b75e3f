//! PostgreSQL Repository Implementations

mod medicine_repository;
mod prompt_repository;

pub use medicine_repository::PgMedicineRepository;
pub use prompt_repository::PgPromptRepository;

/// `%term%` for ILIKE with `\`, `%` and `_` taken literally
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub(crate) fn repository_error(err: sqlx::Error) -> agrimed::DomainError {
    agrimed::DomainError::Repository(err.to_string())
}
