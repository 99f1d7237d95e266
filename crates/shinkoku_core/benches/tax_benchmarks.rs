//! Criterion benchmarks for shinkoku_core
//!
//! Run with: cargo bench -p shinkoku_core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use shinkoku_core::model::{
    ConsumptionTaxInput, ConsumptionTaxMethod, DependentInfo, IncomeTaxInput, LifeInsuranceDetail,
};
use shinkoku_core::{
    IncomeTaxInputBuilder, calc_consumption_tax, calc_income_tax, calc_income_tax_batch,
    furusato_sweep, sanity_check_income_tax,
};

fn create_side_business_input() -> IncomeTaxInput {
    IncomeTaxInputBuilder::new(2025)
        .salary(6_000_000)
        .business(3_500_000, 400_000)
        .social_insurance(850_000)
        .furusato_nozei(50_000)
        .withheld_tax(466_800)
        .build()
        .unwrap()
}

fn create_family_input() -> IncomeTaxInput {
    IncomeTaxInputBuilder::new(2025)
        .salary(9_000_000)
        .social_insurance(1_300_000)
        .life_insurance_detail(LifeInsuranceDetail {
            general_new: 100_000,
            medical_care: 60_000,
            annuity_new: 120_000,
            ..Default::default()
        })
        .medical(350_000, 20_000)
        .spouse_income(800_000)
        .dependent(DependentInfo::new("一郎", "子", "2005-04-01", 0).unwrap())
        .dependent(DependentInfo::new("花子", "母", "1950-06-01", 0).unwrap().cohabiting())
        .housing_loan(30_000_000, 2022)
        .withheld_tax(700_000)
        .build()
        .unwrap()
}

fn bench_single_return(c: &mut Criterion) {
    let input = create_side_business_input();

    c.bench_function("income_tax_side_business", |b| {
        b.iter(|| calc_income_tax(black_box(&input)))
    });

    let family = create_family_input();
    c.bench_function("income_tax_family", |b| {
        b.iter(|| calc_income_tax(black_box(&family)))
    });
}

fn bench_sanity_check(c: &mut Criterion) {
    let input = create_family_input();
    let result = calc_income_tax(&input);

    c.bench_function("sanity_check", |b| {
        b.iter(|| sanity_check_income_tax(black_box(&input), black_box(&result)))
    });
}

fn bench_consumption(c: &mut Criterion) {
    let mut group = c.benchmark_group("consumption_tax");

    for method in [
        ConsumptionTaxMethod::Standard,
        ConsumptionTaxMethod::Simplified,
        ConsumptionTaxMethod::Special20Pct,
    ] {
        let input = ConsumptionTaxInput::new(method)
            .sales(11_000_000, 1_080_000)
            .purchases(4_400_000, 540_000)
            .business_type(5);
        group.bench_with_input(BenchmarkId::new("method", method.as_str()), &input, |b, input| {
            b.iter(|| calc_consumption_tax(black_box(input)))
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let template = create_family_input();

    for size in [100, 1_000, 10_000].iter() {
        let inputs: Vec<IncomeTaxInput> = (0..*size)
            .map(|i| IncomeTaxInput {
                salary_income: 3_000_000 + i64::from(i) * 1_000,
                ..template.clone()
            })
            .collect();

        group.bench_with_input(BenchmarkId::new("returns", size), &inputs, |b, inputs| {
            b.iter(|| calc_income_tax_batch(black_box(inputs)))
        });
    }

    group.finish();
}

fn bench_furusato_sweep(c: &mut Criterion) {
    let input = create_side_business_input();
    let amounts: Vec<i64> = (0..=200).map(|i| i * 1_000).collect();

    c.bench_function("furusato_sweep_201_points", |b| {
        b.iter(|| furusato_sweep(black_box(&input), black_box(&amounts)))
    });
}

criterion_group!(
    benches,
    bench_single_return,
    bench_sanity_check,
    bench_consumption,
    bench_batch,
    bench_furusato_sweep,
);
criterion_main!(benches);
