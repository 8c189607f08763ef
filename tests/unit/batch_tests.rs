//! End-to-end batch environment scenarios

use stepbook::prelude::*;

#[test]
fn test_batch_submit_and_cancel() {
    let mut env = BatchStepEnv::new(101, 0, 1, 100_000);

    let ids = env
        .submit_limit_orders(
            &[true, true, true, false, false, false],
            &[10, 11, 12, 10, 11, 12],
            &[1, 1, 1, 2, 2, 2],
            &[20, 20, 19, 22, 22, 23],
        )
        .unwrap();
    env.step();

    assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(env.level_1_data(), [0, 20, 22, 33, 33, 21, 2, 21, 2]);

    env.submit_cancellations(&[0, 1, 3, 4]);
    env.step();

    let l1 = env.level_1_data();
    assert_eq!((l1[1], l1[2]), (19, 23));
    assert_eq!((l1[5], l1[6]), (12, 1));
    assert_eq!((l1[7], l1[8]), (12, 1));
}

#[test]
fn test_level_2_vector_layout() {
    let mut env = BatchStepEnv::new(101, 0, 1, 100_000);
    env.submit_limit_orders(
        &[true, true, true, false, false, false],
        &[10, 11, 12, 10, 11, 12],
        &[1, 1, 1, 2, 2, 2],
        &[20, 20, 19, 22, 22, 23],
    )
    .unwrap();
    env.step();

    let l2 = env.level_2_data();
    assert_eq!(l2.len(), 45);
    assert_eq!(&l2[..13], &[0, 20, 22, 33, 33, 21, 2, 21, 2, 12, 1, 12, 1]);
    assert!(l2[13..].iter().all(|&v| v == 0));
}

#[test]
fn test_bad_batch_is_a_hard_error() {
    let mut env = BatchStepEnv::new(101, 0, 2, 100_000);

    let result = env.submit_limit_orders(&[true, true], &[10, 11], &[1, 1], &[20, 21]);
    assert!(matches!(
        result,
        Err(InstructionError::MisalignedPrice { index: 1, .. })
    ));

    // Nothing was staged: the next step leaves the book empty.
    env.step();
    assert_eq!(env.book().bid_vol(), 0);
    assert!(env.get_orders().is_empty());
}

#[test]
fn test_mismatched_columns_fail() {
    let mut env = BatchStepEnv::new(101, 0, 1, 100_000);
    let result = env.submit_limit_orders(&[true, false], &[10], &[1, 2], &[20, 22]);
    assert!(matches!(
        result,
        Err(InstructionError::LengthMismatch { .. })
    ));
}

#[test]
fn test_instruction_block_roundtrip() {
    let mut env = BatchStepEnv::new(101, 0, 1, 100_000);

    let block = InstructionBlock {
        kinds: vec![1, 1],
        sides: vec![true, false],
        vols: vec![10, 20],
        trader_ids: vec![101, 202],
        prices: vec![50, 60],
        order_ids: vec![0, 0],
    };
    let ids = env.submit_instructions(&block).unwrap();
    env.step();

    assert_eq!(ids, vec![0, 1]);
    assert_eq!(env.book().bid_ask(), (50, 60));

    let cancel = InstructionBlock {
        kinds: vec![2, 0],
        sides: vec![false, false],
        vols: vec![0, 0],
        trader_ids: vec![0, 0],
        prices: vec![0, 0],
        order_ids: vec![ids[0], 0],
    };
    env.submit_instructions(&cancel).unwrap();
    env.step();

    assert_eq!(env.order_status(ids[0]), Some(OrderStatus::Cancelled));
    assert_eq!(env.book().bid_vol(), 0);
}

#[test]
fn test_batch_agents_through_runner() {
    let mut env = BatchStepEnv::new(101, 0, 2, 100_000);
    let mut agents: Vec<Box<dyn BatchAgent>> =
        vec![Box::new(RandomBatchAgents::new(10, (5, 30), (1, 50), 2))];

    let data = run_batch(&mut env, &mut agents, 20, 101).unwrap();

    assert_eq!(data["bid_price"].len(), 20);
    assert_eq!(env.get_orders().len(), 200);
    // All sampled prices are tick aligned, so nothing was rejected.
    assert!(
        env.get_orders()
            .iter()
            .all(|order| order.status != OrderStatus::Rejected)
    );
}
