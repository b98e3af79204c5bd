//! Cached keys and helpers shared by unit tests, integration tests and
//! benchmarks.
use std::sync::{Arc, OnceLock};

use rand::{Rng, thread_rng};

use crate::{
    DEFAULT_128, Encryption, Evaluation, EvaluationKey, EvaluationKeyNonFft, SecretKey,
    params::DEFAULT_80,
};

static SECRET_KEYS_80: OnceLock<Arc<SecretKey>> = OnceLock::new();
static EVALUATION_KEYS_NON_FFT_80: OnceLock<Arc<EvaluationKeyNonFft>> = OnceLock::new();
static EVALUATION_KEYS_80: OnceLock<Arc<EvaluationKey>> = OnceLock::new();

static SECRET_KEYS_128: OnceLock<Arc<SecretKey>> = OnceLock::new();
static EVALUATION_KEYS_128: OnceLock<Arc<EvaluationKey>> = OnceLock::new();

/// Route `log` output through the test harness. Safe to call repeatedly.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A [`SecretKey`] under [`DEFAULT_80`], generated once per process.
pub fn get_secret_keys_80() -> Arc<SecretKey> {
    SECRET_KEYS_80
        .get_or_init(|| Arc::new(SecretKey::generate(&DEFAULT_80)))
        .clone()
}

/// The non-FFT evaluation key for [`get_secret_keys_80`].
pub fn get_evaluation_key_non_fft_80() -> Arc<EvaluationKeyNonFft> {
    EVALUATION_KEYS_NON_FFT_80
        .get_or_init(|| {
            Arc::new(EvaluationKeyNonFft::generate(
                &get_secret_keys_80(),
                &DEFAULT_80,
            ))
        })
        .clone()
}

/// The evaluation key for [`get_secret_keys_80`].
pub fn get_evaluation_key_80() -> Arc<EvaluationKey> {
    EVALUATION_KEYS_80
        .get_or_init(|| Arc::new(get_evaluation_key_non_fft_80().fft(&DEFAULT_80)))
        .clone()
}

/// A [`SecretKey`] under [`DEFAULT_128`], generated once per process.
pub fn get_secret_keys_128() -> Arc<SecretKey> {
    SECRET_KEYS_128
        .get_or_init(|| Arc::new(SecretKey::generate(&DEFAULT_128)))
        .clone()
}

/// The evaluation key for [`get_secret_keys_128`].
pub fn get_evaluation_key_128() -> Arc<EvaluationKey> {
    EVALUATION_KEYS_128
        .get_or_init(|| {
            Arc::new(EvaluationKey::generate(
                &get_secret_keys_128(),
                &DEFAULT_128,
            ))
        })
        .clone()
}

/// An [`Encryption`] under [`DEFAULT_80`].
pub fn get_encryption_80() -> Encryption {
    Encryption { params: DEFAULT_80 }
}

/// An [`Encryption`] under [`DEFAULT_128`].
pub fn get_encryption_128() -> Encryption {
    Encryption {
        params: DEFAULT_128,
    }
}

/// An [`Evaluation`] using [`get_evaluation_key_80`].
pub fn get_evaluation_80() -> Evaluation {
    init_logger();

    Evaluation::new(get_evaluation_key_80(), &DEFAULT_80)
}

/// An [`Evaluation`] using [`get_evaluation_key_128`].
pub fn get_evaluation_128() -> Evaluation {
    init_logger();

    Evaluation::new(get_evaluation_key_128(), &DEFAULT_128)
}

/// `len` uniformly random bits.
pub fn random_bits(len: usize) -> Vec<bool> {
    let mut rng = thread_rng();

    (0..len).map(|_| rng.r#gen()).collect()
}
