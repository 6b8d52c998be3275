//! Shared test harness modules for the listings CLI.

use super::*;

mod helpers;
