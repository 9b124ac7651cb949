#[cfg(test)]
mod rational_tests;
#[cfg(test)]
mod analysis_tests;
