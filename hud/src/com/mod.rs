// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Topic based communication
//!
//! Producers publish [Event]s through a [Publisher]. Every [Subscription] receives its own
//! copy and is drained once per tick by a [SubMaster], which keeps the latest record per
//! topic together with its receive bookkeeping.

mod interface;
mod intra_proc;
mod sub_master;

pub use interface::{Event, Topic};
pub use intra_proc::{channel, Bus, Publisher, Subscription};
pub use sub_master::SubMaster;
