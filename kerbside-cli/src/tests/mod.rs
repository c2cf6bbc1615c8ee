//! Shared test harness modules for the Kerbside CLI.

use super::*;

mod helpers;
mod steps;
