use rand::rngs::StdRng;
use rand::SeedableRng;
use test_case::test_case;

use ya_argumentation::component::ArgumentGenerator;
use ya_argumentation::{Argument, CriterionName};
use ya_argumentation_testing::{generate_items, generate_preferences, Activation, Framework};

/// Two agents rebut each other's arguments until one of them has nothing to say.
#[test_case(2, 0..50; "Two items")]
#[test_case(5, 0..50; "Five items")]
#[test_case(12, 0..10; "Twelve items")]
fn test_alternating_chain_terminates(num_items: usize, seeds: std::ops::Range<u64>) {
    let items = generate_items(num_items);
    let bound = items.len() * (CriterionName::all().len() + 1);

    for seed in seeds {
        let mut rng = StdRng::seed_from_u64(seed);
        let proposer = generate_preferences(&items, &mut rng).unwrap();
        let opponent = generate_preferences(&items, &mut rng).unwrap();
        let generators = [
            ArgumentGenerator::new(&proposer, &items),
            ArgumentGenerator::new(&opponent, &items),
        ];

        let opening = proposer.most_preferred(&items).unwrap();
        let mut history = Vec::<Argument>::new();
        let mut next = generators[0].justify(opening);
        let mut turn = 1;

        while let Some(argument) = next {
            assert!(
                !history.contains(&argument),
                "Seed {}: argument repeated: {}",
                seed,
                argument
            );
            history.push(argument.clone());
            assert!(
                history.len() <= bound,
                "Seed {}: chain exceeded {} arguments",
                seed,
                bound
            );

            next = generators[turn % 2].generate(argument.item(), Some(&argument), &history);
            turn += 1;
        }
    }
}

#[test_case(Activation::Sequential; "Sequential activation")]
#[test_case(Activation::Random { seed: 7 }; "Random activation")]
fn test_random_discussions_dont_loop(activation: Activation) {
    let items = generate_items(6);

    for seed in 0..10u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut framework = Framework::new(items.clone())
            .activation(activation)
            .max_steps(150);

        for idx in 0..3 {
            framework = framework
                .add_builtin(
                    &format!("Agent{}", idx),
                    "Argumentative",
                    serde_yaml::Value::Null,
                    generate_preferences(&items, &mut rng).unwrap(),
                )
                .unwrap();
        }

        let record = framework.run(200).unwrap();
        assert_eq!(record.infinite_loop(), None);
    }
}
