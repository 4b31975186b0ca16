//! Integration tests driving the release-manager binary

mod helpers;
mod test_bump;
mod test_clean;
mod test_publish;
