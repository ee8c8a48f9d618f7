//! End-to-end scenarios: resolve then evaluate whole programs the way a
//! session does, checking values, printed output and error placement.
