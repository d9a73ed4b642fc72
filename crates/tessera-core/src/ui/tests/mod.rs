#[cfg(test)]
mod context_tests;
