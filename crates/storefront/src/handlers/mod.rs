//! UI entry points.
//!
//! # Entry Points
//!
//! ```text
//! # Auth
//! register(form)              - Create account, sign in, merge guest cart
//! login(form)                 - Sign in, merge guest cart
//! logout()                    - Sign out
//! request_password_reset(e)   - Reset step 1, returns a ResetTicket
//! set_new_password(t, pw)     - Reset step 2
//!
//! # Cart
//! add_to_cart(item)           - Append to the active cart
//! remove_from_cart(index)     - Remove by position
//! remove_line(line_id)        - Remove by line id
//! clear_cart()                - Empty the active cart
//! checkout()                  - Place an order (signed in only)
//! merge_guest_now()           - Move guest lines into the account cart
//! cart_page()                 - Cart page state
//! orders()                    - Order history
//!
//! # Sync
//! view()                      - Header state
//! on_storage_event(event)     - React to another tab's write
//! sync(events)                - React to a batch of writes
//! ```
//!
//! Every entry point acts on the identity stored at the time of the call,
//! reports failures through the notification sink, and returns the
//! refreshed header state where it changes anything.

pub mod auth;
pub mod cart;
pub mod sync;
