// tests/utils.rs
use rand::Rng;
use remote_facts::util::{average, find_max, is_palindrome, unique_elements, Queue, Stack};

#[test]
fn documented_scenarios() {
    assert_eq!(unique_elements(&[1, 2, 2, 3, 1]), vec![1, 2, 3]);
    assert_eq!(find_max(&[3, 7, 2]), Some(7));
    assert_eq!(find_max::<i64>(&[]), None);
    assert_eq!(average(&[2.0, 4.0, 6.0]), Some(4.0));
    assert_eq!(average(&[]), None);
    assert!(is_palindrome("A man, a plan, a canal: Panama"));
}

#[test]
fn unique_is_idempotent_on_random_input() {
    let mut rng = rand::rng();
    for _ in 0..200 {
        let len = rng.random_range(0..40);
        let xs: Vec<u8> = (0..len).map(|_| rng.random_range(0..8)).collect();
        let once = unique_elements(&xs);
        assert_eq!(unique_elements(&once), once);
        assert!(once.iter().all(|x| xs.contains(x)));
        if let Some(m) = find_max(&xs) {
            assert!(xs.iter().all(|x| *x <= m));
        } else {
            assert!(xs.is_empty());
        }
    }
}

#[test]
fn containers_track_size_and_peek_does_not_mutate() {
    let mut s: Stack<u32> = (1..=3).collect();
    let mut q: Queue<u32> = (1..=3).collect();
    for _ in 0..3 {
        assert_eq!(s.peek(), s.peek());
        assert_eq!(q.peek(), q.peek());
    }
    assert_eq!((s.len(), q.len()), (3, 3));
    assert_eq!(s.pop(), Some(3));
    assert_eq!(q.dequeue(), Some(1));
    assert_eq!((s.len(), q.len()), (2, 2));
}
