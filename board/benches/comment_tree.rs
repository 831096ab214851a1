use std::sync::Arc;

use comment_board::comment::{Change, Comment, CommentPatch, Forest, tree};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::Rng;

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("comment_tree");
    for p in [(10, 1), (100, 3), (1000, 10), (10000, 30)].iter() {
        let (comments, last_id) = generate_comments(p.0, p.1);
        group.bench_function(BenchmarkId::new("path_copy", p.0), |b| {
            b.iter(|| path_copy_upvote(&comments, &last_id))
        });
        group.bench_function(BenchmarkId::new("deep_clone", p.0), |b| {
            b.iter(|| deep_clone_upvote(&comments, &last_id))
        });
    }
    group.finish();
}

// Each new comment becomes a reply to a random comment no deeper than
// max_depth, or a new root
fn generate_comments(n: usize, max_depth: usize) -> (Forest, String) {
    let mut comments: Forest = vec![];
    let mut placed: Vec<(String, usize)> = vec![];
    for i in 0..n {
        let id = i.to_string();
        let comment = Comment::new(id.clone(), "content");
        let parent = if placed.is_empty() {
            None
        } else {
            let candidate = &placed[rand::thread_rng().gen_range(0..placed.len())];
            (candidate.1 < max_depth).then(|| candidate.clone())
        };

        match parent {
            Some((parent_id, depth)) => {
                comments = tree::apply_by_id(&comments, &parent_id, |_| {
                    Change::AppendReply(Arc::new(comment))
                });
                placed.push((id, depth + 1));
            }
            None => {
                comments.push(Arc::new(comment));
                placed.push((id, 0));
            }
        }
    }
    (comments, (n - 1).to_string())
}

fn path_copy_upvote(comments: &Forest, id: &str) -> Forest {
    tree::apply_by_id(comments, id, |c| {
        Change::Patch(CommentPatch {
            upvotes: Some(c.upvotes + 1),
            ..Default::default()
        })
    })
}

fn deep_clone_upvote(comments: &Forest, id: &str) -> Vec<Comment> {
    let mut owned: Vec<Comment> = comments.iter().map(|c| deep_clone(c)).collect();
    upvote_in_place(&mut owned, id);
    owned
}

fn deep_clone(comment: &Comment) -> Comment {
    Comment {
        replies: comment
            .replies
            .iter()
            .map(|r| Arc::new(deep_clone(r)))
            .collect(),
        ..comment.clone()
    }
}

fn upvote_in_place(comments: &mut [Comment], id: &str) -> bool {
    for comment in comments {
        if comment.id == id {
            comment.upvotes += 1;
            return true;
        }
        let mut replies: Vec<Comment> = comment.replies.iter().map(|r| (**r).clone()).collect();
        if upvote_in_place(&mut replies, id) {
            comment.replies = replies.into_iter().map(Arc::new).collect();
            return true;
        }
    }
    false
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
