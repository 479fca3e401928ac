#![allow(missing_docs, unreachable_pub)]

mod host;
