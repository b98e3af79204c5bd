use std::sync::{Arc, OnceLock};

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ramux::{
    DEFAULT_80, EncryptedAddress, Encryption, Evaluation, EvaluationKey, EvaluationKeyNonFft,
    Memory, SecretKey, test_utils::random_bits,
};

fn make_evaluator() -> (Encryption, Arc<SecretKey>, Evaluation) {
    static SK: OnceLock<Arc<SecretKey>> = OnceLock::new();
    static EVALUATION_KEY: OnceLock<Arc<EvaluationKey>> = OnceLock::new();

    let sk = SK
        .get_or_init(|| Arc::new(SecretKey::generate(&DEFAULT_80)))
        .clone();

    let evaluation_key = EVALUATION_KEY
        .get_or_init(|| {
            let key = EvaluationKeyNonFft::generate(&sk, &DEFAULT_80);

            Arc::new(key.fft(&DEFAULT_80))
        })
        .clone();

    let enc = Encryption::new(&DEFAULT_80);
    let eval = Evaluation::new(evaluation_key, &DEFAULT_80);

    (enc, sk, eval)
}

fn memory_ops(c: &mut Criterion) {
    let (enc, sk, eval) = make_evaluator();

    let mut group = c.benchmark_group("memory");
    group.sample_size(10);

    for width in [4, 6, 8] {
        let bits = random_bits(1 << width);
        let mut memory = Memory::setup(&bits, width, &enc, &sk).unwrap();
        let address = EncryptedAddress::encrypt(bits.len() - 1, width, &enc, &sk).unwrap();

        group.bench_with_input(BenchmarkId::new("read", width), &width, |bench, _| {
            bench.iter(|| memory.read(&address, &eval).unwrap());
        });

        let flag = enc.encrypt_lwe_l0_secret(true, &sk);
        let value = enc.encrypt_lwe_l0_secret(false, &sk);

        group.bench_with_input(BenchmarkId::new("write", width), &width, |bench, _| {
            bench.iter(|| memory.write(&address, &flag, &value, &eval).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, memory_ops);
criterion_main!(benches);
