use std::thread;

use contract_model::kind::CodeClassifier;
use contract_pdf::{render_job, RenderOptions};
use contract_tests::{load_demo, SolidImages, DEMOS};
use futures_lite::future::block_on;

#[test]
fn parallel_renders_are_independent() {
    let classifier = CodeClassifier::default();
    let options = RenderOptions::default();
    let jobs: Vec<_> = DEMOS.iter().map(|name| load_demo(name)).collect();
    let sequential: Vec<_> = jobs
        .iter()
        .map(|job| block_on(render_job(job, &classifier, &SolidImages, &options)).unwrap())
        .collect();

    let parallel: Vec<Vec<u8>> = thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .flat_map(|_| jobs.iter())
            .map(|job| {
                let (classifier, options) = (&classifier, &options);
                s.spawn(move || {
                    block_on(render_job(job, classifier, &SolidImages, options))
                        .unwrap()
                        .bytes
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(parallel.len(), 4 * jobs.len());
    for (index, bytes) in parallel.iter().enumerate() {
        assert_eq!(bytes, &sequential[index % jobs.len()].bytes);
    }
}
