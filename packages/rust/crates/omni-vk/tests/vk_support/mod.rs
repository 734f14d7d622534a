#![allow(dead_code)]

mod envelopes;
mod mock_api;
mod server;

#[allow(unused_imports)]
pub(crate) use envelopes::{message_new_envelope, sample_message_object};
#[allow(unused_imports)]
pub(crate) use mock_api::{MockVkApi, group_response};
#[allow(unused_imports)]
pub(crate) use server::spawn_test_server;
