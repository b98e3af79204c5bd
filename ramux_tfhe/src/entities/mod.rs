mod bootstrap_key;
pub use bootstrap_key::*;

mod circuit_bootstrapping_keyswitch_keys;
pub use circuit_bootstrapping_keyswitch_keys::*;

mod ggsw_ciphertext;
pub use ggsw_ciphertext::*;

mod glwe_ciphertext;
pub use glwe_ciphertext::*;

mod glwe_secret_key;
pub use glwe_secret_key::*;

mod lwe_ciphertext;
pub use lwe_ciphertext::*;

mod lwe_keyswitch_key;
pub use lwe_keyswitch_key::*;

mod lwe_secret_key;
pub use lwe_secret_key::*;

mod polynomial;
pub use polynomial::*;

mod polynomial_fft;
pub use polynomial_fft::*;
