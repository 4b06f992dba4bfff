//! End-to-end checks of the HTTP transport against toy servers on the loopback interface.
#![cfg(test)]

mod dispatch;
mod support;
